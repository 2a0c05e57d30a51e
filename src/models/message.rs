use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub event_id: i64,
    pub user_name: Option<String>,
    pub message_text: String,
    pub created_at: i64,
}

/// Message fields shown on the public event page. Timestamps stay private
/// to the event creator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicMessage {
    pub id: i64,
    pub user_name: Option<String>,
    pub message_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub event_id: Option<i64>,
    pub user_name: Option<String>,
    pub message_text: Option<String>,
}
