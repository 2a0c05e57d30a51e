use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Authentication("Unauthorized".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Delivery(msg) => {
                tracing::error!("Delivery error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = json!({ "error": error_message });
        (status, Json(body)).into_response()
    }
}

impl From<crate::repositories::RepositoryError> for AppError {
    fn from(err: crate::repositories::RepositoryError) -> Self {
        match err {
            crate::repositories::RepositoryError::NotFound => {
                AppError::NotFound("Record not found".to_string())
            }
            crate::repositories::RepositoryError::Database(e) => AppError::Database(e),
        }
    }
}
