pub mod booking_types;
pub mod notification_types;
