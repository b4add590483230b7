use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

use crate::models::booking_model::BookingStatus;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("{0}")]
    Validation(String),

    #[error("dependency failure: {0}")]
    Dependency(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BookingError {
    pub fn to_response(&self) -> HttpResponse {
        match self {
            BookingError::NotFound(_) => HttpResponse::NotFound().json(json!({
                "success": false,
                "message": self.to_string()
            })),
            BookingError::InvalidTransition { .. } | BookingError::Validation(_) => {
                HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": self.to_string()
                }))
            }
            BookingError::Dependency(_) => HttpResponse::BadGateway().json(json!({
                "success": false,
                "message": self.to_string()
            })),
            BookingError::Database(_) => HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Database error"
            })),
        }
    }
}
