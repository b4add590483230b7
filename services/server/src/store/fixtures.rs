use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::booking_model::{
    BookingRow, BookingStatus, BookingWithRelations, EventCategory, EventSummary, TeamSummary,
    UserRow,
};

pub fn make_user(id: i64, name: &str) -> UserRow {
    UserRow {
        id,
        name: name.to_string(),
        email: format!("{}@ecstasia.test", name.to_lowercase().replace(' ', ".")),
        phone: None,
        image_url: None,
    }
}

pub fn make_event(
    id: i64,
    title: &str,
    category: EventCategory,
    group_size: &str,
    coordinators: &[i64],
) -> EventSummary {
    EventSummary {
        id,
        title: title.to_string(),
        category,
        group_size: group_size.to_string(),
        coordinators: coordinators.to_vec(),
    }
}

pub fn make_team(id: i64, name: &str, members: Vec<UserRow>) -> TeamSummary {
    TeamSummary {
        id,
        name: name.to_string(),
        members,
    }
}

pub fn make_booking(
    id: i64,
    team_name: &str,
    leader_name: &str,
    event_title: &str,
    category: EventCategory,
    group_size: &str,
) -> BookingWithRelations {
    let leader = make_user(id * 100, leader_name);
    let event = make_event(id * 10, event_title, category, group_size, &[]);
    let team = make_team(id * 20, team_name, vec![leader.clone()]);
    let created_at =
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap() + Duration::minutes(id);

    BookingWithRelations {
        booking: BookingRow {
            id,
            booking_code: format!("ECS-TEST{:04}", id),
            event_id: event.id,
            team_id: team.id,
            leader_id: leader.id,
            price: Decimal::new(50000, 2),
            status: BookingStatus::Pending,
            is_paid: false,
            payment_screenshot: None,
            created_at,
            updated_at: created_at,
        },
        event,
        team,
        leader,
    }
}
