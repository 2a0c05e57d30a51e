use crate::error::AppError;
use crate::models::contribution::CreateContributionRequest;
use crate::services::contribution_service::ContributionServiceError;
use crate::AppState;
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

/// POST /contributions/create (public — visitors need no account)
pub async fn create_contribution_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateContributionRequest>,
) -> Result<Json<Value>, AppError> {
    let contribution = state
        .contribution_service
        .create_contribution(body)
        .await
        .map_err(|e| match e {
            ContributionServiceError::InvalidInput => AppError::Validation(e.to_string()),
            ContributionServiceError::EventNotFound => AppError::NotFound(e.to_string()),
            ContributionServiceError::Repository(inner) => inner.into(),
        })?;

    Ok(Json(json!({
        "success": true,
        "contribution": contribution,
    })))
}
