use crate::auth::middleware::extract_session_token;
use crate::config::DeliveryChannel;
use crate::error::AppError;
use crate::services::magic_link_service::{IssueMagicLinkRequest, MagicLinkError};
use crate::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

// Required fields are Option so a missing key produces our 400 instead
// of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

fn map_magic_link_error(err: MagicLinkError) -> AppError {
    match err {
        MagicLinkError::MissingEmail
        | MagicLinkError::InvalidEmail
        | MagicLinkError::MissingName
        | MagicLinkError::MissingToken => AppError::Validation(err.to_string()),
        MagicLinkError::InvalidToken => AppError::Authentication(err.to_string()),
        MagicLinkError::Email(e) => AppError::Delivery(e.to_string()),
        MagicLinkError::Repository(e) => e.into(),
    }
}

/// POST /auth/magic-link
pub async fn magic_link_handler(
    State(state): State<AppState>,
    Json(body): Json<MagicLinkRequest>,
) -> Result<Json<Value>, AppError> {
    let issued = state
        .magic_link_service
        .issue(IssueMagicLinkRequest {
            email: body.email.unwrap_or_default(),
            name: body.name,
        })
        .await
        .map_err(map_magic_link_error)?;

    let mut response = json!({
        "success": true,
        "message": "Magic link sent to your email",
    });

    // Inline delivery hands the token back to the caller instead of
    // emailing it; used for local development and tests.
    if issued.delivery == DeliveryChannel::Inline {
        response["dev_token"] = json!(issued.token);
        response["dev_link"] = json!(issued.link);
    }

    Ok(Json(response))
}

/// POST /auth/verify
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequest>,
) -> Result<Json<Value>, AppError> {
    let login = state
        .magic_link_service
        .verify(body.token.as_deref().unwrap_or(""))
        .await
        .map_err(map_magic_link_error)?;

    Ok(Json(json!({
        "success": true,
        "session_token": login.session_token,
        "user": login.user,
    })))
}

/// GET /auth/me
pub async fn me_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = extract_session_token(&headers, &jar)
        .ok_or_else(|| AppError::Authentication("Not authenticated".to_string()))?;

    let user = state
        .session_service
        .resolve(Some(&token))
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid session".to_string()))?;

    Ok(Json(json!({ "user": user })))
}

/// POST /auth/logout — succeeds whether or not a session existed.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let token = extract_session_token(&headers, &jar);

    state.session_service.logout(token.as_deref()).await?;

    Ok(Json(json!({ "success": true })))
}
