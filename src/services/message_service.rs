use crate::models::message::{CreateMessageRequest, Message};
use crate::repositories::event_repository::EventRepository;
use crate::repositories::message_repository::MessageRepository;
use crate::repositories::RepositoryError;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum MessageServiceError {
    #[error("Event ID and message text are required")]
    MissingFields,
    #[error("Event not found")]
    EventNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Guestbook entries left by visitors; no account needed.
pub struct MessageService {
    event_repository: Arc<dyn EventRepository>,
    message_repository: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(
        event_repository: Arc<dyn EventRepository>,
        message_repository: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            event_repository,
            message_repository,
        }
    }

    pub async fn create_message(
        &self,
        request: CreateMessageRequest,
    ) -> Result<Message, MessageServiceError> {
        let event_id = request.event_id.ok_or(MessageServiceError::MissingFields)?;
        let message_text = request
            .message_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(MessageServiceError::MissingFields)?;
        let user_name = request
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        if !self.event_repository.exists(event_id).await? {
            return Err(MessageServiceError::EventNotFound);
        }

        Ok(self
            .message_repository
            .create(event_id, user_name, message_text)
            .await?)
    }
}
