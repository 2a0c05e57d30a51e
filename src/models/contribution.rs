use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contribution {
    pub id: i64,
    pub event_id: i64,
    pub contributor_name: Option<String>,
    pub amount: f64,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateContributionRequest {
    pub event_id: Option<i64>,
    pub contributor_name: Option<String>,
    pub amount: Option<f64>,
}
