use crate::models::contribution::Contribution;
use crate::models::event::{CreateEventRequest, Event, EventWithStats, PublicEvent};
use crate::models::message::{Message, PublicMessage};
use crate::repositories::contribution_repository::ContributionRepository;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::RepositoryError;
use crate::token;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error("Title and event date are required")]
    MissingFields,
    #[error("Event not found")]
    EventNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// What a visitor holding the shareable link gets to see.
pub struct PublicEventView {
    pub event: PublicEvent,
    pub messages: Vec<PublicMessage>,
}

/// The creator's private view, contributions included.
pub struct CreatorEventDetail {
    pub event: Event,
    pub messages: Vec<Message>,
    pub contributions: Vec<Contribution>,
    pub total_contributions: f64,
}

pub struct EventService {
    event_repository: Arc<dyn EventRepository>,
    message_repository: Arc<dyn MessageRepository>,
    contribution_repository: Arc<dyn ContributionRepository>,
}

impl EventService {
    pub fn new(
        event_repository: Arc<dyn EventRepository>,
        message_repository: Arc<dyn MessageRepository>,
        contribution_repository: Arc<dyn ContributionRepository>,
    ) -> Self {
        Self {
            event_repository,
            message_repository,
            contribution_repository,
        }
    }

    pub async fn create_event(
        &self,
        user_id: i64,
        request: CreateEventRequest,
    ) -> Result<Event, EventServiceError> {
        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(EventServiceError::MissingFields)?;
        let event_date = request
            .event_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(EventServiceError::MissingFields)?;

        // Regenerate on collision; with 36^8 codes this loop effectively
        // runs once.
        let shareable_link = loop {
            let code = token::shareable_code();
            if !self.event_repository.shareable_link_exists(&code).await? {
                break code;
            }
        };

        let event = self
            .event_repository
            .create(
                user_id,
                title,
                request.description.as_deref(),
                event_date,
                request.cover_image.as_deref(),
                &shareable_link,
            )
            .await?;

        tracing::info!("User {} created event {}", user_id, event.id);

        Ok(event)
    }

    pub async fn public_event(
        &self,
        shareable_link: &str,
    ) -> Result<PublicEventView, EventServiceError> {
        let event = self
            .event_repository
            .find_public_by_shareable_link(shareable_link)
            .await?
            .ok_or(EventServiceError::EventNotFound)?;

        let messages = self
            .message_repository
            .list_public_for_event(event.id)
            .await?;

        Ok(PublicEventView { event, messages })
    }

    pub async fn creator_events(
        &self,
        user_id: i64,
    ) -> Result<Vec<EventWithStats>, EventServiceError> {
        Ok(self.event_repository.list_with_stats(user_id).await?)
    }

    pub async fn creator_event_detail(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<CreatorEventDetail, EventServiceError> {
        let event = self
            .event_repository
            .find_by_id_for_user(event_id, user_id)
            .await?
            .ok_or(EventServiceError::EventNotFound)?;

        let messages = self.message_repository.list_for_event(event_id).await?;
        let contributions = self
            .contribution_repository
            .list_for_event(event_id)
            .await?;
        let total_contributions = self
            .contribution_repository
            .total_for_event(event_id)
            .await?;

        Ok(CreatorEventDetail {
            event,
            messages,
            contributions,
            total_contributions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::contribution_repository::MockContributionRepository;
    use crate::repositories::event_repository::MockEventRepository;
    use crate::repositories::message_repository::MockMessageRepository;

    fn service_with(event_repo: MockEventRepository) -> EventService {
        EventService::new(
            Arc::new(event_repo),
            Arc::new(MockMessageRepository::new()),
            Arc::new(MockContributionRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_create_event_requires_title_and_date() {
        let service = service_with(MockEventRepository::new());

        let result = service
            .create_event(
                1,
                CreateEventRequest {
                    title: None,
                    description: None,
                    event_date: Some("2026-09-01".to_string()),
                    cover_image: None,
                },
            )
            .await;

        assert!(matches!(result, Err(EventServiceError::MissingFields)));
    }

    #[tokio::test]
    async fn test_create_event_generates_shareable_code() {
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_shareable_link_exists()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(false) }));
        event_repo
            .expect_create()
            .withf(|_, title, _, date, _, link| {
                title == "Birthday" && date == "2026-09-01" && link.len() == 8
            })
            .times(1)
            .returning(|user_id, title, _, event_date, _, link| {
                let title = title.to_string();
                let event_date = event_date.to_string();
                let link = link.to_string();
                Box::pin(async move {
                    Ok(Event {
                        id: 1,
                        user_id,
                        title,
                        description: None,
                        event_date,
                        cover_image: None,
                        shareable_link: link,
                        created_at: 0,
                    })
                })
            });

        let service = service_with(event_repo);

        let event = service
            .create_event(
                1,
                CreateEventRequest {
                    title: Some("Birthday".to_string()),
                    description: None,
                    event_date: Some("2026-09-01".to_string()),
                    cover_image: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(event.shareable_link.len(), token::SHAREABLE_CODE_LENGTH);
    }

    #[tokio::test]
    async fn test_public_event_unknown_link_is_not_found() {
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_find_public_by_shareable_link()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));

        let service = service_with(event_repo);

        let result = service.public_event("missing1").await;
        assert!(matches!(result, Err(EventServiceError::EventNotFound)));
    }
}
