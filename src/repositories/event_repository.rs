use super::{RepositoryError, RepositoryResult};
use crate::models::event::{Event, EventWithStats, PublicEvent};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EventRepository: Send + Sync {
    async fn create(
        &self,
        user_id: i64,
        title: &str,
        description: Option<&str>,
        event_date: &str,
        cover_image: Option<&str>,
        shareable_link: &str,
    ) -> RepositoryResult<Event>;
    async fn exists(&self, id: i64) -> RepositoryResult<bool>;
    async fn shareable_link_exists(&self, link: &str) -> RepositoryResult<bool>;
    async fn find_public_by_shareable_link(
        &self,
        link: &str,
    ) -> RepositoryResult<Option<PublicEvent>>;
    /// Ownership-checked lookup; returns None when the event does not
    /// exist or belongs to someone else.
    async fn find_by_id_for_user(&self, id: i64, user_id: i64)
        -> RepositoryResult<Option<Event>>;
    async fn list_with_stats(&self, user_id: i64) -> RepositoryResult<Vec<EventWithStats>>;
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(
        &self,
        user_id: i64,
        title: &str,
        description: Option<&str>,
        event_date: &str,
        cover_image: Option<&str>,
        shareable_link: &str,
    ) -> RepositoryResult<Event> {
        let result = sqlx::query(
            "INSERT INTO events (user_id, title, description, event_date, cover_image, shareable_link) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(event_date)
        .bind(cover_image)
        .bind(shareable_link)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, user_id, title, description, event_date, cover_image, shareable_link, created_at \
             FROM events WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or(RepositoryError::NotFound)
    }

    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let row: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn shareable_link_exists(&self, link: &str) -> RepositoryResult<bool> {
        let row: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE shareable_link = ?")
            .bind(link)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn find_public_by_shareable_link(
        &self,
        link: &str,
    ) -> RepositoryResult<Option<PublicEvent>> {
        let event = sqlx::query_as::<_, PublicEvent>(
            "SELECT e.id, e.title, e.description, e.event_date, e.cover_image, u.name AS creator_name \
             FROM events e \
             JOIN users u ON e.user_id = u.id \
             WHERE e.shareable_link = ?",
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_by_id_for_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> RepositoryResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, user_id, title, description, event_date, cover_image, shareable_link, created_at \
             FROM events WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list_with_stats(&self, user_id: i64) -> RepositoryResult<Vec<EventWithStats>> {
        // Correlated subqueries instead of a double LEFT JOIN: joining
        // messages and contributions together would multiply the SUM.
        let events = sqlx::query_as::<_, EventWithStats>(
            "SELECT \
                 e.id, e.user_id, e.title, e.description, e.event_date, e.cover_image, \
                 e.shareable_link, e.created_at, \
                 (SELECT COUNT(*) FROM messages m WHERE m.event_id = e.id) AS message_count, \
                 (SELECT COUNT(*) FROM contributions c WHERE c.event_id = e.id) AS contribution_count, \
                 (SELECT COALESCE(SUM(c.amount), 0.0) FROM contributions c WHERE c.event_id = e.id) \
                     AS total_contributions \
             FROM events e \
             WHERE e.user_id = ? \
             ORDER BY e.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
