use crate::error::AppError;
use crate::models::message::CreateMessageRequest;
use crate::services::message_service::MessageServiceError;
use crate::AppState;
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

/// POST /messages/create (public — visitors need no account)
pub async fn create_message_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let message = state
        .message_service
        .create_message(body)
        .await
        .map_err(|e| match e {
            MessageServiceError::MissingFields => AppError::Validation(e.to_string()),
            MessageServiceError::EventNotFound => AppError::NotFound(e.to_string()),
            MessageServiceError::Repository(inner) => inner.into(),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": message,
    })))
}
