use actix_web::{post, web, HttpResponse, Responder};
use log::warn;
use serde_json::json;
use validator::Validate;

use crate::types::notification_types::SendNotificationRequest;
use crate::utils::push::send_push;

#[post("/send")]
pub async fn send_notification(body: web::Json<SendNotificationRequest>) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = request.validate() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": e.to_string()
        }));
    }

    match send_push(
        &request.tokens,
        &request.title,
        &request.body,
        request.image_url.as_deref(),
        request.logo_url.as_deref(),
    )
    .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Notification dispatched"
        })),
        Err(e) => {
            // dispatch failures are non-fatal and never retried here
            warn!("push notification dispatch failed: {}", e);
            HttpResponse::Ok().json(json!({
                "success": false,
                "message": e.to_string()
            }))
        }
    }
}
