use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[validate(length(min = 1))]
    pub tokens: Vec<String>,
    #[validate(length(min = 1))]
    pub title: String,
    pub body: String,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}
