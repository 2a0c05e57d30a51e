pub mod test_helpers {
    use crate::config::{DeliveryChannel, MagicLinkConfig};
    use crate::repositories::{
        SqliteContributionRepository, SqliteEventRepository, SqliteMessageRepository,
        SqliteSessionRepository, SqliteUserRepository,
    };
    use crate::services::email_service::MockEmailService;
    use crate::services::{
        ContributionService, EventService, MagicLinkService, MessageService, SessionService,
    };
    use crate::AppState;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Wire a full application state against `pool`, with inline magic
    /// link delivery so tests can read tokens out of responses.
    pub fn build_test_state(pool: &SqlitePool) -> AppState {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let session_repository = Arc::new(SqliteSessionRepository::new(pool.clone()));
        let event_repository = Arc::new(SqliteEventRepository::new(pool.clone()));
        let message_repository = Arc::new(SqliteMessageRepository::new(pool.clone()));
        let contribution_repository = Arc::new(SqliteContributionRepository::new(pool.clone()));

        let magic_link_service = Arc::new(MagicLinkService::new(
            user_repository.clone(),
            session_repository.clone(),
            Box::new(MockEmailService::new()),
            MagicLinkConfig {
                base_url: "http://localhost:8080".to_string(),
                delivery: DeliveryChannel::Inline,
            },
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

        AppState {
            magic_link_service,
            session_service,
            event_service,
            message_service,
            contribution_service,
            pool: pool.clone(),
        }
    }

    /// Insert a test user without a pending magic token
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        name: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, name) VALUES (?, ?)")
            .bind(email)
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a session row directly, bypassing the magic link flow
    pub async fn insert_test_session(
        pool: &SqlitePool,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO sessions (user_id, session_token, expires_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(token)
            .bind(expires_at)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Create a test event, returning its id and shareable link
    pub async fn insert_test_event(
        pool: &SqlitePool,
        user_id: i64,
        title: &str,
        shareable_link: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO events (user_id, title, event_date, shareable_link) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(title)
        .bind("2026-09-01")
        .bind(shareable_link)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
