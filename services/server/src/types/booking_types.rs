use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::booking_model::{BookingStatus, EventCategory};
use crate::store::filter::{clamp_limit, clamp_page, BookingFilter};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<EventCategory>,
    pub group_size: Option<String>,
    pub booking_status: Option<BookingStatus>,
}

impl ListBookingsQuery {
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn filter(&self) -> BookingFilter {
        BookingFilter {
            search: self.search.clone(),
            category: self.category,
            group_size: self.group_size.clone(),
            status: self.booking_status,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorBookingsQuery {
    pub cor_id: i64,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<EventCategory>,
    pub group_size: Option<String>,
    pub booking_status: Option<BookingStatus>,
}

impl CoordinatorBookingsQuery {
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn filter(&self) -> BookingFilter {
        BookingFilter {
            search: self.search.clone(),
            category: self.category,
            group_size: self.group_size.clone(),
            status: self.booking_status,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberBookingsQuery {
    pub member_id: i64,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl MemberBookingsQuery {
    pub fn page(&self) -> i64 {
        clamp_page(self.page)
    }

    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn filter(&self) -> BookingFilter {
        BookingFilter {
            search: self.search.clone(),
            ..BookingFilter::default()
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: i64,
    pub team_id: i64,
    pub price: Decimal,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(length(min = 1))]
    pub booking_id: String,
    pub status: Option<BookingStatus>,
    pub is_paid: Option<bool>,
    #[validate(url)]
    pub payment_screenshot: Option<String>,
}

#[derive(Serialize, Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookingRequest {
    #[validate(length(min = 1))]
    pub booking_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_and_limit_default_when_absent_or_invalid() {
        let query = ListBookingsQuery {
            page: Some(0),
            limit: Some(-5),
            search: None,
            category: None,
            group_size: None,
            booking_status: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn camel_case_body_with_enum_values_parses() {
        let request: UpdateBookingRequest = serde_json::from_value(json!({
            "bookingId": "ECS-AB12CD34",
            "status": "CONFIRMED",
            "isPaid": true
        }))
        .unwrap();

        assert_eq!(request.booking_id, "ECS-AB12CD34");
        assert_eq!(request.status, Some(BookingStatus::Confirmed));
        assert_eq!(request.is_paid, Some(true));
        assert_eq!(request.payment_screenshot, None);
    }

    #[test]
    fn unknown_status_is_rejected_at_the_boundary() {
        let result = serde_json::from_value::<UpdateBookingRequest>(json!({
            "bookingId": "ECS-AB12CD34",
            "status": "REFUNDED"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn screenshot_url_is_validated() {
        let request = UpdateBookingRequest {
            booking_id: "ECS-AB12CD34".to_string(),
            status: None,
            is_paid: None,
            payment_screenshot: Some("not-a-url".to_string()),
        };
        assert!(request.validate().is_err());
    }
}
