use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub cover_image: Option<String>,
    pub shareable_link: String,
    pub created_at: i64,
}

/// Event fields visible to anyone holding the shareable link.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub cover_image: Option<String>,
    pub creator_name: String,
}

/// Creator dashboard row: an event with its guestbook totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventWithStats {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub cover_image: Option<String>,
    pub shareable_link: String,
    pub created_at: i64,
    pub message_count: i64,
    pub contribution_count: i64,
    pub total_contributions: f64,
}

// Required fields are Option so missing keys surface as our own 400
// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub cover_image: Option<String>,
}
