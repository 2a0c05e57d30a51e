pub mod contribution_repository;
pub mod event_repository;
pub mod message_repository;
pub mod session_repository;
pub mod user_repository;

pub use contribution_repository::{ContributionRepository, SqliteContributionRepository};
pub use event_repository::{EventRepository, SqliteEventRepository};
pub use message_repository::{MessageRepository, SqliteMessageRepository};
pub use session_repository::{SessionRepository, SqliteSessionRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
