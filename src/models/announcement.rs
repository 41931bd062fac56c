use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Announcement {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_breaking: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BroadcastRequest {
    #[schema(example = "Draw closes tonight at midnight!")]
    pub text: String,
    pub is_breaking: Option<bool>,
}
