use festbook::{build_router, config::MagicLinkConfig, db, repositories, services, AppState};

use repositories::{
    SqliteContributionRepository, SqliteEventRepository, SqliteMessageRepository,
    SqliteSessionRepository, SqliteUserRepository,
};
use services::{
    ContributionService, EventService, MagicLinkService, MessageService, SessionService,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "festbook=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let pool = db::create_pool().await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repository = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let event_repository = Arc::new(SqliteEventRepository::new(pool.clone()));
    let message_repository = Arc::new(SqliteMessageRepository::new(pool.clone()));
    let contribution_repository = Arc::new(SqliteContributionRepository::new(pool.clone()));

    // Initialize services
    let email_service = services::create_email_service();
    let magic_link_service = Arc::new(MagicLinkService::new(
        user_repository.clone(),
        session_repository.clone(),
        email_service,
        MagicLinkConfig::from_env(),
    ));
    let session_service = Arc::new(SessionService::new(session_repository.clone()));
    let event_service = Arc::new(EventService::new(
        event_repository.clone(),
        message_repository.clone(),
        contribution_repository.clone(),
    ));
    let message_service = Arc::new(MessageService::new(
        event_repository.clone(),
        message_repository.clone(),
    ));
    let contribution_service = Arc::new(ContributionService::new(
        event_repository.clone(),
        contribution_repository.clone(),
    ));

    // Create app state
    let app_state = AppState {
        magic_link_service,
        session_service,
        event_service,
        message_service,
        contribution_service,
        pool: pool.clone(),
    };

    // Browser clients talk to this API from a separate frontend origin
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    let app = build_router(app_state).layer(cors_layer);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()?;

    let addr = SocketAddr::from((host.parse::<std::net::IpAddr>()?, port));

    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
