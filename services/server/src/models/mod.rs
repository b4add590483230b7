pub mod booking_model;
