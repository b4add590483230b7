use actix_web::{get, post, web, HttpMessage, HttpRequest, HttpResponse, Responder};
use rust_decimal::Decimal;
use serde_json::json;
use validator::Validate;

use crate::error::BookingError;
use crate::middleware::auth::AuthContext;
use crate::models::booking_model::Role;
use crate::services::listing::{invalidate_listings, list_bookings};
use crate::store::pg::PgBookingStore;
use crate::store::transition::{plan_transition, BookingAction};
use crate::store::{BookingStore, NewBooking, Scope};
use crate::types::booking_types::{
    CoordinatorBookingsQuery, CreateBookingRequest, DeleteBookingRequest, ListBookingsQuery,
    MemberBookingsQuery, UpdateBookingRequest,
};

#[get("/getAllBookings")]
pub async fn get_all_bookings(
    store: web::Data<PgBookingStore>,
    query: web::Query<ListBookingsQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match list_bookings(
        store.get_ref(),
        Scope::All,
        &query.filter(),
        query.page(),
        query.limit(),
    )
    .await
    {
        Ok(result) => HttpResponse::Ok().json(json!({
            "data": {
                "bookings": result.bookings,
                "bookingsCount": result.total_count,
                "offset": result.offset,
                "limit": result.limit
            }
        })),
        Err(e) => e.to_response(),
    }
}

#[get("/getAllBookingsByCorId")]
pub async fn get_all_bookings_by_cor_id(
    store: web::Data<PgBookingStore>,
    query: web::Query<CoordinatorBookingsQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match list_bookings(
        store.get_ref(),
        Scope::Coordinator(query.cor_id),
        &query.filter(),
        query.page(),
        query.limit(),
    )
    .await
    {
        Ok(result) => HttpResponse::Ok().json(json!({
            "data": {
                "bookings": result.bookings,
                "bookingsCount": result.total_count,
                "offset": result.offset,
                "limit": result.limit
            }
        })),
        Err(e) => e.to_response(),
    }
}

#[get("/getBookingsByMemberId")]
pub async fn get_bookings_by_member_id(
    store: web::Data<PgBookingStore>,
    query: web::Query<MemberBookingsQuery>,
) -> impl Responder {
    let query = query.into_inner();

    match list_bookings(
        store.get_ref(),
        Scope::Member(query.member_id),
        &query.filter(),
        query.page(),
        query.limit(),
    )
    .await
    {
        Ok(result) => HttpResponse::Ok().json(json!({
            "data": {
                "bookings": result.bookings,
                "bookingCount": result.total_count,
                "offset": result.offset,
                "limit": result.limit
            }
        })),
        Err(e) => e.to_response(),
    }
}

#[post("/createBooking")]
pub async fn create_booking(
    req: HttpRequest,
    store: web::Data<PgBookingStore>,
    body: web::Json<CreateBookingRequest>,
) -> impl Responder {
    let context = match req.extensions().get::<AuthContext>().copied() {
        Some(context) => context,
        None => {
            return HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Authentication required"
            }));
        }
    };

    let request = body.into_inner();
    if let Err(e) = request.validate() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": e.to_string()
        }));
    }
    if request.price < Decimal::ZERO {
        return BookingError::Validation("price cannot be negative".to_string()).to_response();
    }

    match store
        .create(NewBooking {
            event_id: request.event_id,
            team_id: request.team_id,
            leader_id: context.user_id,
            price: request.price,
        })
        .await
    {
        Ok(booking) => {
            invalidate_listings().await;
            HttpResponse::Ok().json(json!({
                "success": true,
                "booking": booking,
                "message": "Booking created successfully"
            }))
        }
        Err(e) => e.to_response(),
    }
}

#[post("/updateBooking")]
pub async fn update_booking(
    store: web::Data<PgBookingStore>,
    body: web::Json<UpdateBookingRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.validate() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": e.to_string()
        }));
    }

    let current = match store.get(&request.booking_id).await {
        Ok(current) => current,
        Err(e) => return e.to_response(),
    };

    let booking = if let Some(target) = request.status {
        let action = match BookingAction::for_target(target) {
            Some(action) => action,
            None => {
                return BookingError::Validation(
                    "a booking cannot be moved back to PENDING".to_string(),
                )
                .to_response();
            }
        };

        let plan = match plan_transition(current.booking.status, action) {
            Ok(plan) => plan,
            Err(e) => return e.to_response(),
        };

        // is_paid is owned by the transition, not the caller
        if let Some(requested_paid) = request.is_paid {
            let resulting_paid = plan.is_paid.unwrap_or(current.booking.is_paid);
            if requested_paid != resulting_paid {
                return BookingError::Validation(
                    "isPaid is derived from the status transition".to_string(),
                )
                .to_response();
            }
        }

        match store
            .update_status(&request.booking_id, plan.from, plan.to, plan.is_paid)
            .await
        {
            Ok(booking) => booking,
            Err(e) => return e.to_response(),
        }
    } else if request.is_paid.is_some() {
        return BookingError::Validation(
            "isPaid cannot change without a status change".to_string(),
        )
        .to_response();
    } else if request.payment_screenshot.is_none() {
        return BookingError::Validation("nothing to update".to_string()).to_response();
    } else {
        current.booking.clone()
    };

    let booking = match request.payment_screenshot.as_deref() {
        Some(url) => match store.set_payment_screenshot(&request.booking_id, url).await {
            Ok(booking) => booking,
            Err(e) => return e.to_response(),
        },
        None => booking,
    };

    invalidate_listings().await;

    HttpResponse::Ok().json(json!({
        "success": true,
        "booking": booking,
        "message": "Booking updated successfully"
    }))
}

#[post("/deleteBooking")]
pub async fn delete_booking(
    req: HttpRequest,
    store: web::Data<PgBookingStore>,
    body: web::Json<DeleteBookingRequest>,
) -> impl Responder {
    let context = match req.extensions().get::<AuthContext>().copied() {
        Some(context) => context,
        None => {
            return HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Authentication required"
            }));
        }
    };
    if !matches!(context.role, Role::Admin | Role::Coordinator) {
        return HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Admin or coordinator access required"
        }));
    }

    let request = body.into_inner();
    if let Err(e) = request.validate() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": e.to_string()
        }));
    }

    match store.delete(&request.booking_id).await {
        Ok(()) => {
            invalidate_listings().await;
            HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Booking deleted successfully"
            }))
        }
        Err(e) => e.to_response(),
    }
}
