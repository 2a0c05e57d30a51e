pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod token;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub magic_link_service: Arc<services::magic_link_service::MagicLinkService>,
    pub session_service: Arc<services::session_service::SessionService>,
    pub event_service: Arc<services::event_service::EventService>,
    pub message_service: Arc<services::message_service::MessageService>,
    pub contribution_service: Arc<services::contribution_service::ContributionService>,
    pub pool: sqlx::SqlitePool,
}

/// Assemble the full route tree. Protected routes sit behind the auth
/// gate; everything else is reachable without a session.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/events/create", post(handlers::create_event_handler))
        .route("/events/creator/list", get(handlers::creator_list_handler))
        .route(
            "/events/creator/{event_id}",
            get(handlers::creator_event_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .route("/auth/magic-link", post(auth::handlers::magic_link_handler))
        .route("/auth/verify", post(auth::handlers::verify_handler))
        .route("/auth/me", get(auth::handlers::me_handler))
        .route("/auth/logout", post(auth::handlers::logout_handler))
        .merge(protected_routes)
        .route(
            "/events/{shareable_link}",
            get(handlers::public_event_handler),
        )
        .route("/messages/create", post(handlers::create_message_handler))
        .route(
            "/contributions/create",
            post(handlers::create_contribution_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
