use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use super::{BookingStore, NewBooking, Scope};
use crate::error::BookingError;
use crate::models::booking_model::{
    BookingRow, BookingStatus, BookingWithRelations, EventSummary, TeamSummary, UserRow,
};

/// HashMap-backed stand-in for the Postgres store, mirroring its semantics
/// (scope predicates, CAS status updates, non-idempotent delete).
#[derive(Default)]
pub struct InMemoryBookingStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    events: HashMap<i64, EventSummary>,
    teams: HashMap<i64, TeamSummary>,
    users: HashMap<i64, UserRow>,
    bookings: Vec<BookingWithRelations>,
    next_id: i64,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_event(&self, event: EventSummary) {
        self.inner.lock().unwrap().events.insert(event.id, event);
    }

    pub fn seed_team(&self, team: TeamSummary) {
        self.inner.lock().unwrap().teams.insert(team.id, team);
    }

    pub fn seed_user(&self, user: UserRow) {
        self.inner.lock().unwrap().users.insert(user.id, user);
    }

    pub fn seed_booking(&self, booking: BookingWithRelations) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id = inner.next_id.max(booking.booking.id);
        inner.bookings.push(booking);
    }
}

impl BookingStore for InMemoryBookingStore {
    async fn create(&self, new_booking: NewBooking) -> Result<BookingRow, BookingError> {
        let mut inner = self.inner.lock().unwrap();

        let event = inner
            .events
            .get(&new_booking.event_id)
            .cloned()
            .ok_or(BookingError::NotFound("event"))?;
        let team = inner
            .teams
            .get(&new_booking.team_id)
            .cloned()
            .ok_or(BookingError::NotFound("team"))?;
        let leader = inner
            .users
            .get(&new_booking.leader_id)
            .cloned()
            .ok_or(BookingError::NotFound("user"))?;

        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();
        let booking = BookingRow {
            id,
            booking_code: format!("ECS-MEM{:05}", id),
            event_id: event.id,
            team_id: team.id,
            leader_id: leader.id,
            price: new_booking.price,
            status: BookingStatus::Pending,
            is_paid: false,
            payment_screenshot: None,
            created_at: now,
            updated_at: now,
        };
        inner.bookings.push(BookingWithRelations {
            booking: booking.clone(),
            event,
            team,
            leader,
        });

        Ok(booking)
    }

    async fn get(&self, booking_code: &str) -> Result<BookingWithRelations, BookingError> {
        self.inner
            .lock()
            .unwrap()
            .bookings
            .iter()
            .find(|b| b.booking.booking_code == booking_code)
            .cloned()
            .ok_or(BookingError::NotFound("booking"))
    }

    async fn list(&self, scope: Scope) -> Result<Vec<BookingWithRelations>, BookingError> {
        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<BookingWithRelations> = inner
            .bookings
            .iter()
            .filter(|b| match scope {
                Scope::All => true,
                Scope::Coordinator(id) => b.event.coordinators.contains(&id),
                Scope::Member(id) => b.team.members.iter().any(|m| m.id == id),
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booking.id);
        Ok(bookings)
    }

    async fn update_status(
        &self,
        booking_code: &str,
        from: BookingStatus,
        to: BookingStatus,
        is_paid: Option<bool>,
    ) -> Result<BookingRow, BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .bookings
            .iter_mut()
            .find(|b| b.booking.booking_code == booking_code)
            .ok_or(BookingError::NotFound("booking"))?;

        if entry.booking.status != from {
            return Err(BookingError::InvalidTransition {
                from: entry.booking.status,
                to,
            });
        }

        entry.booking.status = to;
        if let Some(paid) = is_paid {
            entry.booking.is_paid = paid;
        }
        entry.booking.updated_at = Utc::now();

        Ok(entry.booking.clone())
    }

    async fn set_payment_screenshot(
        &self,
        booking_code: &str,
        url: &str,
    ) -> Result<BookingRow, BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner
            .bookings
            .iter_mut()
            .find(|b| b.booking.booking_code == booking_code)
            .ok_or(BookingError::NotFound("booking"))?;

        entry.booking.payment_screenshot = Some(url.to_string());
        entry.booking.updated_at = Utc::now();

        Ok(entry.booking.clone())
    }

    async fn delete(&self, booking_code: &str) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.bookings.len();
        inner
            .bookings
            .retain(|b| b.booking.booking_code != booking_code);

        if inner.bookings.len() == before {
            return Err(BookingError::NotFound("booking"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking_model::EventCategory;
    use crate::store::fixtures::{make_event, make_team, make_user};
    use rust_decimal::Decimal;

    fn store_with_references() -> InMemoryBookingStore {
        let store = InMemoryBookingStore::new();
        let leader = make_user(1, "Asha");
        store.seed_user(leader.clone());
        store.seed_event(make_event(10, "Street Battle", EventCategory::Dance, "4-6", &[7]));
        store.seed_team(make_team(20, "Dragons", vec![leader]));
        store
    }

    #[tokio::test]
    async fn create_starts_bookings_as_unpaid_pending() {
        let store = store_with_references();

        let booking = store
            .create(NewBooking {
                event_id: 10,
                team_id: 20,
                leader_id: 1,
                price: Decimal::new(50000, 2),
            })
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.is_paid);
        assert!(booking.booking_code.starts_with("ECS-"));

        let listed = store.list(Scope::All).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].booking, booking);
    }

    #[tokio::test]
    async fn create_fails_when_references_do_not_resolve() {
        let store = store_with_references();

        let missing_event = store
            .create(NewBooking {
                event_id: 99,
                team_id: 20,
                leader_id: 1,
                price: Decimal::ZERO,
            })
            .await;
        assert!(matches!(missing_event, Err(BookingError::NotFound("event"))));

        let missing_team = store
            .create(NewBooking {
                event_id: 10,
                team_id: 99,
                leader_id: 1,
                price: Decimal::ZERO,
            })
            .await;
        assert!(matches!(missing_team, Err(BookingError::NotFound("team"))));
    }
}
