use super::RepositoryResult;
use crate::models::session::Session;
use crate::models::user::PublicUser;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, user_id: i64, token: &str, expires_at: i64)
        -> RepositoryResult<Session>;
    /// Resolve a session token to its owning user, treating expired
    /// sessions exactly like nonexistent ones.
    async fn find_user_by_valid_token(
        &self,
        token: &str,
        now: i64,
    ) -> RepositoryResult<Option<PublicUser>>;
    /// Delete the session holding `token`. Deleting a token that does not
    /// exist is not an error.
    async fn delete_by_token(&self, token: &str) -> RepositoryResult<()>;
}

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn create(
        &self,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> RepositoryResult<Session> {
        let result = sqlx::query(
            "INSERT INTO sessions (user_id, session_token, expires_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(Session {
            id: result.last_insert_rowid(),
            user_id,
            session_token: token.to_string(),
            expires_at,
        })
    }

    async fn find_user_by_valid_token(
        &self,
        token: &str,
        now: i64,
    ) -> RepositoryResult<Option<PublicUser>> {
        let user = sqlx::query_as::<_, PublicUser>(
            "SELECT u.id, u.email, u.name \
             FROM sessions s \
             JOIN users u ON s.user_id = u.id \
             WHERE s.session_token = ? AND s.expires_at > ?",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_by_token(&self, token: &str) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
