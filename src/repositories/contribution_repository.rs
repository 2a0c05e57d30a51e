use super::{RepositoryError, RepositoryResult};
use crate::models::contribution::Contribution;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ContributionRepository: Send + Sync {
    async fn create(
        &self,
        event_id: i64,
        contributor_name: Option<&str>,
        amount: f64,
    ) -> RepositoryResult<Contribution>;
    /// Contributions for the event creator, newest first.
    async fn list_for_event(&self, event_id: i64) -> RepositoryResult<Vec<Contribution>>;
    async fn total_for_event(&self, event_id: i64) -> RepositoryResult<f64>;
}

pub struct SqliteContributionRepository {
    pool: SqlitePool,
}

impl SqliteContributionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContributionRepository for SqliteContributionRepository {
    async fn create(
        &self,
        event_id: i64,
        contributor_name: Option<&str>,
        amount: f64,
    ) -> RepositoryResult<Contribution> {
        let result = sqlx::query(
            "INSERT INTO contributions (event_id, contributor_name, amount) VALUES (?, ?, ?)",
        )
        .bind(event_id)
        .bind(contributor_name)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let contribution = sqlx::query_as::<_, Contribution>(
            "SELECT id, event_id, contributor_name, amount, created_at \
             FROM contributions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        contribution.ok_or(RepositoryError::NotFound)
    }

    async fn list_for_event(&self, event_id: i64) -> RepositoryResult<Vec<Contribution>> {
        let contributions = sqlx::query_as::<_, Contribution>(
            "SELECT id, event_id, contributor_name, amount, created_at \
             FROM contributions \
             WHERE event_id = ? \
             ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(contributions)
    }

    async fn total_for_event(&self, event_id: i64) -> RepositoryResult<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0.0) FROM contributions WHERE event_id = ?",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
