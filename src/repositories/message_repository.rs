use super::{RepositoryError, RepositoryResult};
use crate::models::message::{Message, PublicMessage};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MessageRepository: Send + Sync {
    async fn create(
        &self,
        event_id: i64,
        user_name: Option<&str>,
        message_text: &str,
    ) -> RepositoryResult<Message>;
    /// Messages as shown on the public event page, newest first.
    async fn list_public_for_event(&self, event_id: i64) -> RepositoryResult<Vec<PublicMessage>>;
    /// Full rows for the event creator, newest first.
    async fn list_for_event(&self, event_id: i64) -> RepositoryResult<Vec<Message>>;
}

pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn create(
        &self,
        event_id: i64,
        user_name: Option<&str>,
        message_text: &str,
    ) -> RepositoryResult<Message> {
        let result = sqlx::query(
            "INSERT INTO messages (event_id, user_name, message_text) VALUES (?, ?, ?)",
        )
        .bind(event_id)
        .bind(user_name)
        .bind(message_text)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let message = sqlx::query_as::<_, Message>(
            "SELECT id, event_id, user_name, message_text, created_at \
             FROM messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        message.ok_or(RepositoryError::NotFound)
    }

    async fn list_public_for_event(&self, event_id: i64) -> RepositoryResult<Vec<PublicMessage>> {
        let messages = sqlx::query_as::<_, PublicMessage>(
            "SELECT id, user_name, message_text \
             FROM messages \
             WHERE event_id = ? \
             ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn list_for_event(&self, event_id: i64) -> RepositoryResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, event_id, user_name, message_text, created_at \
             FROM messages \
             WHERE event_id = ? \
             ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
