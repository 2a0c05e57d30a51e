use crate::error::AppError;
use crate::models::event::CreateEventRequest;
use crate::models::user::PublicUser;
use crate::services::event_service::EventServiceError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

fn map_event_error(err: EventServiceError, not_found_message: &str) -> AppError {
    match err {
        EventServiceError::MissingFields => AppError::Validation(err.to_string()),
        EventServiceError::EventNotFound => AppError::NotFound(not_found_message.to_string()),
        EventServiceError::Repository(e) => e.into(),
    }
}

/// POST /events/create (auth required)
pub async fn create_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<PublicUser>,
    Json(body): Json<CreateEventRequest>,
) -> Result<Json<Value>, AppError> {
    let event = state
        .event_service
        .create_event(user.id, body)
        .await
        .map_err(|e| map_event_error(e, "Event not found"))?;

    Ok(Json(json!({
        "success": true,
        "event": event,
    })))
}

/// GET /events/{shareable_link} (public)
pub async fn public_event_handler(
    State(state): State<AppState>,
    Path(shareable_link): Path<String>,
) -> Result<Json<Value>, AppError> {
    let view = state
        .event_service
        .public_event(&shareable_link)
        .await
        .map_err(|e| map_event_error(e, "Event not found"))?;

    Ok(Json(json!({
        "event": view.event,
        "messages": view.messages,
    })))
}

/// GET /events/creator/list (auth required)
pub async fn creator_list_handler(
    State(state): State<AppState>,
    Extension(user): Extension<PublicUser>,
) -> Result<Json<Value>, AppError> {
    let events = state
        .event_service
        .creator_events(user.id)
        .await
        .map_err(|e| map_event_error(e, "Event not found"))?;

    Ok(Json(json!({ "events": events })))
}

/// GET /events/creator/{event_id} (auth required)
pub async fn creator_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<PublicUser>,
    Path(event_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let detail = state
        .event_service
        .creator_event_detail(user.id, event_id)
        .await
        .map_err(|e| map_event_error(e, "Event not found or unauthorized"))?;

    Ok(Json(json!({
        "event": detail.event,
        "messages": detail.messages,
        "contributions": detail.contributions,
        "total_contributions": detail.total_contributions,
    })))
}
