use super::{RepositoryError, RepositoryResult};
use crate::models::user::User;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
    /// Insert a new user together with their first magic token.
    async fn create_with_magic_token(
        &self,
        email: &str,
        name: &str,
        token: &str,
        expires_at: i64,
    ) -> RepositoryResult<User>;
    /// Overwrite the pending magic token of an existing user. Any prior
    /// token becomes permanently unusable.
    async fn set_magic_token(
        &self,
        email: &str,
        token: &str,
        expires_at: i64,
    ) -> RepositoryResult<()>;
    async fn find_by_valid_magic_token(
        &self,
        token: &str,
        now: i64,
    ) -> RepositoryResult<Option<User>>;
    /// Atomically clear the magic token, returning whether this call was
    /// the one that consumed it. A raced second verification sees zero
    /// rows affected and gets `false`.
    async fn consume_magic_token(&self, user_id: i64, token: &str) -> RepositoryResult<bool>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at, magic_token, magic_token_expires_at \
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at, magic_token, magic_token_expires_at \
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_with_magic_token(
        &self,
        email: &str,
        name: &str,
        token: &str,
        expires_at: i64,
    ) -> RepositoryResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, name, magic_token, magic_token_expires_at) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(name)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn set_magic_token(
        &self,
        email: &str,
        token: &str,
        expires_at: i64,
    ) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE users SET magic_token = ?, magic_token_expires_at = ? WHERE email = ?",
        )
        .bind(token)
        .bind(expires_at)
        .bind(email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn find_by_valid_magic_token(
        &self,
        token: &str,
        now: i64,
    ) -> RepositoryResult<Option<User>> {
        // The partial unique index on magic_token makes more than one match
        // impossible; ORDER BY id keeps the lookup deterministic anyway.
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, created_at, magic_token, magic_token_expires_at \
             FROM users \
             WHERE magic_token = ? AND magic_token_expires_at > ? \
             ORDER BY id LIMIT 1",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn consume_magic_token(&self, user_id: i64, token: &str) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET magic_token = NULL, magic_token_expires_at = NULL \
             WHERE id = ? AND magic_token = ?",
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
