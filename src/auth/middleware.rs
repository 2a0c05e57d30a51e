use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Pull the session credential out of the request: the Authorization
/// header wins over the cookie when both are present.
pub fn extract_session_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            let token = value.strip_prefix("Bearer ").unwrap_or(value);
            return Some(token.to_string());
        }
    }

    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Gate for protected routes. Resolves the credential to a user and makes
/// it available to the wrapped handler via request extensions; requests
/// without a live session never reach the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(request.headers(), &jar);

    let user = state.session_service.resolve(token.as_deref()).await?;

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => Err(AppError::unauthorized()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer header-token"),
        );
        let jar = CookieJar::new().add(
            axum_extra::extract::cookie::Cookie::new(SESSION_COOKIE, "cookie-token"),
        );

        assert_eq!(
            extract_session_token(&headers, &jar),
            Some("header-token".to_string())
        );
    }

    #[test]
    fn test_extract_falls_back_to_cookie() {
        let headers = HeaderMap::new();
        let jar = CookieJar::new().add(
            axum_extra::extract::cookie::Cookie::new(SESSION_COOKIE, "cookie-token"),
        );

        assert_eq!(
            extract_session_token(&headers, &jar),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_extract_none_when_no_credential() {
        assert_eq!(
            extract_session_token(&HeaderMap::new(), &CookieJar::new()),
            None
        );
    }

    #[test]
    fn test_extract_accepts_raw_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("raw-token"),
        );

        assert_eq!(
            extract_session_token(&headers, &CookieJar::new()),
            Some("raw-token".to_string())
        );
    }
}
