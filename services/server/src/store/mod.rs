pub mod filter;
pub mod pg;
pub mod transition;

#[cfg(test)]
pub mod memory;

#[cfg(test)]
pub(crate) mod fixtures;

use rust_decimal::Decimal;

use crate::error::BookingError;
use crate::models::booking_model::{BookingRow, BookingStatus, BookingWithRelations};

/// Caller-role-dependent subset of bookings a listing call may see. The scope
/// predicate is applied at the store layer, not by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Coordinator(i64),
    Member(i64),
}

impl Scope {
    pub fn cache_tag(&self) -> String {
        match self {
            Scope::All => "all".to_string(),
            Scope::Coordinator(id) => format!("cor:{}", id),
            Scope::Member(id) => format!("member:{}", id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub event_id: i64,
    pub team_id: i64,
    pub leader_id: i64,
    pub price: Decimal,
}

pub trait BookingStore {
    async fn create(&self, new_booking: NewBooking) -> Result<BookingRow, BookingError>;

    async fn get(&self, booking_code: &str) -> Result<BookingWithRelations, BookingError>;

    /// Full candidate set for a scope, in primary-key order, with relations
    /// eager-loaded. Filtering and pagination happen in memory afterwards.
    async fn list(&self, scope: Scope) -> Result<Vec<BookingWithRelations>, BookingError>;

    /// Compare-and-set status update: only applies if the stored status still
    /// equals `from`. A lost race surfaces as `InvalidTransition`.
    async fn update_status(
        &self,
        booking_code: &str,
        from: BookingStatus,
        to: BookingStatus,
        is_paid: Option<bool>,
    ) -> Result<BookingRow, BookingError>;

    async fn set_payment_screenshot(
        &self,
        booking_code: &str,
        url: &str,
    ) -> Result<BookingRow, BookingError>;

    async fn delete(&self, booking_code: &str) -> Result<(), BookingError>;
}
