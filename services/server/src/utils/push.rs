use log::info;
use serde_json::json;
use std::env;

use crate::error::BookingError;

/// Fire-and-forget push dispatch to the configured FCM-style endpoint.
/// Failures surface as `Dependency` errors and are never retried here.
pub async fn send_push(
    tokens: &[String],
    title: &str,
    body: &str,
    image_url: Option<&str>,
    logo_url: Option<&str>,
) -> Result<(), BookingError> {
    let endpoint = env::var("PUSH_API_URL")
        .map_err(|_| BookingError::Dependency("PUSH_API_URL not configured".to_string()))?;
    let server_key = env::var("PUSH_API_KEY")
        .map_err(|_| BookingError::Dependency("PUSH_API_KEY not configured".to_string()))?;

    let payload = json!({
        "registration_ids": tokens,
        "notification": {
            "title": title,
            "body": body,
            "image": image_url,
            "icon": logo_url,
        }
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&endpoint)
        .header("Authorization", format!("key={}", server_key))
        .json(&payload)
        .send()
        .await
        .map_err(|e| BookingError::Dependency(format!("push dispatch failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(BookingError::Dependency(format!(
            "push endpoint returned {}",
            response.status()
        )));
    }

    info!("dispatched push notification to {} device(s)", tokens.len());
    Ok(())
}
