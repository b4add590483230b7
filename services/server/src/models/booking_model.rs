use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "event_category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Dance,
    Music,
    Drama,
    FineArts,
    Literary,
    Photography,
    Gaming,
    Fashion,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Dance => "DANCE",
            EventCategory::Music => "MUSIC",
            EventCategory::Drama => "DRAMA",
            EventCategory::FineArts => "FINE_ARTS",
            EventCategory::Literary => "LITERARY",
            EventCategory::Photography => "PHOTOGRAPHY",
            EventCategory::Gaming => "GAMING",
            EventCategory::Fashion => "FASHION",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Coordinator,
    Member,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingRow {
    pub id: i64,
    #[serde(rename = "bookingId")]
    pub booking_code: String,
    pub event_id: i64,
    pub team_id: i64,
    pub leader_id: i64,
    pub price: Decimal,
    pub status: BookingStatus,
    pub is_paid: bool,
    pub payment_screenshot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: i64,
    pub title: String,
    pub category: EventCategory,
    pub group_size: String,
    pub coordinators: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: i64,
    pub name: String,
    pub members: Vec<UserRow>,
}

/// A booking joined with the relations every listing and detail view needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithRelations {
    #[serde(flatten)]
    pub booking: BookingRow,
    pub event: EventSummary,
    pub team: TeamSummary,
    pub leader: UserRow,
}
