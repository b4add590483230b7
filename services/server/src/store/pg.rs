use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use super::{BookingStore, NewBooking, Scope};
use crate::error::BookingError;
use crate::models::booking_model::{
    BookingRow, BookingStatus, BookingWithRelations, EventCategory, EventSummary, TeamSummary,
    UserRow,
};

const BOOKING_COLUMNS: &str = "id, booking_code, event_id, team_id, leader_id, price, status, \
     is_paid, payment_screenshot, created_at, updated_at";

const LIST_SELECT: &str = "SELECT b.id, b.booking_code, b.event_id, b.team_id, b.leader_id, \
     b.price, b.status, b.is_paid, b.payment_screenshot, b.created_at, b.updated_at, \
     e.title AS event_title, e.category AS event_category, e.group_size AS event_group_size, \
     t.name AS team_name, \
     u.name AS leader_name, u.email AS leader_email, u.phone AS leader_phone, \
     u.image_url AS leader_image_url \
     FROM bookings b \
     JOIN events e ON e.id = b.event_id \
     JOIN teams t ON t.id = b.team_id \
     JOIN users u ON u.id = b.leader_id";

#[derive(Debug, FromRow)]
struct BookingJoinRow {
    id: i64,
    booking_code: String,
    event_id: i64,
    team_id: i64,
    leader_id: i64,
    price: Decimal,
    status: BookingStatus,
    is_paid: bool,
    payment_screenshot: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    event_title: String,
    event_category: EventCategory,
    event_group_size: String,
    team_name: String,
    leader_name: String,
    leader_email: String,
    leader_phone: Option<String>,
    leader_image_url: Option<String>,
}

#[derive(Debug, FromRow)]
struct TeamMemberRow {
    team_id: i64,
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, FromRow)]
struct CoordinatorRow {
    event_id: i64,
    user_id: i64,
}

pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn generate_booking_code() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        format!("ECS-{}", suffix.to_uppercase())
    }

    async fn load_rows(&self, scope: Scope) -> Result<Vec<BookingJoinRow>, sqlx::Error> {
        match scope {
            Scope::All => {
                let sql = format!("{} ORDER BY b.id ASC", LIST_SELECT);
                sqlx::query_as::<_, BookingJoinRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
            Scope::Coordinator(coordinator_id) => {
                let sql = format!(
                    "{} WHERE EXISTS (SELECT 1 FROM event_coordinators ec \
                     WHERE ec.event_id = b.event_id AND ec.user_id = $1) ORDER BY b.id ASC",
                    LIST_SELECT
                );
                sqlx::query_as::<_, BookingJoinRow>(&sql)
                    .bind(coordinator_id)
                    .fetch_all(&self.pool)
                    .await
            }
            Scope::Member(member_id) => {
                let sql = format!(
                    "{} WHERE EXISTS (SELECT 1 FROM team_members tm \
                     WHERE tm.team_id = b.team_id AND tm.user_id = $1) ORDER BY b.id ASC",
                    LIST_SELECT
                );
                sqlx::query_as::<_, BookingJoinRow>(&sql)
                    .bind(member_id)
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }

    async fn load_row_by_code(
        &self,
        booking_code: &str,
    ) -> Result<Option<BookingJoinRow>, sqlx::Error> {
        let sql = format!("{} WHERE b.booking_code = $1", LIST_SELECT);
        sqlx::query_as::<_, BookingJoinRow>(&sql)
            .bind(booking_code)
            .fetch_optional(&self.pool)
            .await
    }

    async fn assemble(
        &self,
        rows: Vec<BookingJoinRow>,
    ) -> Result<Vec<BookingWithRelations>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut team_ids: Vec<i64> = rows.iter().map(|r| r.team_id).collect();
        team_ids.sort_unstable();
        team_ids.dedup();
        let mut event_ids: Vec<i64> = rows.iter().map(|r| r.event_id).collect();
        event_ids.sort_unstable();
        event_ids.dedup();

        let members = sqlx::query_as::<_, TeamMemberRow>(
            "SELECT tm.team_id, u.id, u.name, u.email, u.phone, u.image_url \
             FROM team_members tm JOIN users u ON u.id = tm.user_id \
             WHERE tm.team_id = ANY($1) ORDER BY tm.team_id, u.id",
        )
        .bind(&team_ids)
        .fetch_all(&self.pool)
        .await?;

        let coordinators = sqlx::query_as::<_, CoordinatorRow>(
            "SELECT event_id, user_id FROM event_coordinators \
             WHERE event_id = ANY($1) ORDER BY event_id, user_id",
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut members_by_team: HashMap<i64, Vec<UserRow>> = HashMap::new();
        for m in members {
            members_by_team.entry(m.team_id).or_default().push(UserRow {
                id: m.id,
                name: m.name,
                email: m.email,
                phone: m.phone,
                image_url: m.image_url,
            });
        }

        let mut coordinators_by_event: HashMap<i64, Vec<i64>> = HashMap::new();
        for c in coordinators {
            coordinators_by_event
                .entry(c.event_id)
                .or_default()
                .push(c.user_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| BookingWithRelations {
                event: EventSummary {
                    id: row.event_id,
                    title: row.event_title,
                    category: row.event_category,
                    group_size: row.event_group_size,
                    coordinators: coordinators_by_event
                        .get(&row.event_id)
                        .cloned()
                        .unwrap_or_default(),
                },
                team: TeamSummary {
                    id: row.team_id,
                    name: row.team_name,
                    members: members_by_team.get(&row.team_id).cloned().unwrap_or_default(),
                },
                leader: UserRow {
                    id: row.leader_id,
                    name: row.leader_name,
                    email: row.leader_email,
                    phone: row.leader_phone,
                    image_url: row.leader_image_url,
                },
                booking: BookingRow {
                    id: row.id,
                    booking_code: row.booking_code,
                    event_id: row.event_id,
                    team_id: row.team_id,
                    leader_id: row.leader_id,
                    price: row.price,
                    status: row.status,
                    is_paid: row.is_paid,
                    payment_screenshot: row.payment_screenshot,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
            })
            .collect())
    }
}

impl BookingStore for PgBookingStore {
    async fn create(&self, new_booking: NewBooking) -> Result<BookingRow, BookingError> {
        let event: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = $1")
            .bind(new_booking.event_id)
            .fetch_optional(&self.pool)
            .await?;
        if event.is_none() {
            return Err(BookingError::NotFound("event"));
        }

        let team: Option<i64> = sqlx::query_scalar("SELECT id FROM teams WHERE id = $1")
            .bind(new_booking.team_id)
            .fetch_optional(&self.pool)
            .await?;
        if team.is_none() {
            return Err(BookingError::NotFound("team"));
        }

        let leader: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
            .bind(new_booking.leader_id)
            .fetch_optional(&self.pool)
            .await?;
        if leader.is_none() {
            return Err(BookingError::NotFound("user"));
        }

        let sql = format!(
            "INSERT INTO bookings (booking_code, event_id, team_id, leader_id, price, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            BOOKING_COLUMNS
        );
        let booking = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(Self::generate_booking_code())
            .bind(new_booking.event_id)
            .bind(new_booking.team_id)
            .bind(new_booking.leader_id)
            .bind(new_booking.price)
            .bind(BookingStatus::Pending)
            .fetch_one(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn get(&self, booking_code: &str) -> Result<BookingWithRelations, BookingError> {
        let row = self
            .load_row_by_code(booking_code)
            .await?
            .ok_or(BookingError::NotFound("booking"))?;
        let mut assembled = self.assemble(vec![row]).await?;
        assembled.pop().ok_or(BookingError::NotFound("booking"))
    }

    async fn list(&self, scope: Scope) -> Result<Vec<BookingWithRelations>, BookingError> {
        let rows = self.load_rows(scope).await?;
        Ok(self.assemble(rows).await?)
    }

    async fn update_status(
        &self,
        booking_code: &str,
        from: BookingStatus,
        to: BookingStatus,
        is_paid: Option<bool>,
    ) -> Result<BookingRow, BookingError> {
        let sql = format!(
            "UPDATE bookings SET status = $3, is_paid = COALESCE($4, is_paid), \
             updated_at = NOW() WHERE booking_code = $1 AND status = $2 RETURNING {}",
            BOOKING_COLUMNS
        );
        let updated = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_code)
            .bind(from)
            .bind(to)
            .bind(is_paid)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(booking) => Ok(booking),
            None => {
                // Either the booking is gone or a concurrent update won the CAS.
                let current: Option<BookingStatus> =
                    sqlx::query_scalar("SELECT status FROM bookings WHERE booking_code = $1")
                        .bind(booking_code)
                        .fetch_optional(&self.pool)
                        .await?;
                match current {
                    Some(actual) => Err(BookingError::InvalidTransition { from: actual, to }),
                    None => Err(BookingError::NotFound("booking")),
                }
            }
        }
    }

    async fn set_payment_screenshot(
        &self,
        booking_code: &str,
        url: &str,
    ) -> Result<BookingRow, BookingError> {
        let sql = format!(
            "UPDATE bookings SET payment_screenshot = $2, updated_at = NOW() \
             WHERE booking_code = $1 RETURNING {}",
            BOOKING_COLUMNS
        );
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(booking_code)
            .bind(url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingError::NotFound("booking"))
    }

    async fn delete(&self, booking_code: &str) -> Result<(), BookingError> {
        let result = sqlx::query("DELETE FROM bookings WHERE booking_code = $1")
            .bind(booking_code)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound("booking"));
        }
        Ok(())
    }
}
