pub mod booking_controller;
pub mod notification_controller;
