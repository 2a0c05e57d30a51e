use crate::models::contribution::{Contribution, CreateContributionRequest};
use crate::repositories::contribution_repository::ContributionRepository;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::RepositoryError;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ContributionServiceError {
    #[error("Event ID and valid amount are required")]
    InvalidInput,
    #[error("Event not found")]
    EventNotFound,
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Monetary contributions against an event; no account needed.
pub struct ContributionService {
    event_repository: Arc<dyn EventRepository>,
    contribution_repository: Arc<dyn ContributionRepository>,
}

impl ContributionService {
    pub fn new(
        event_repository: Arc<dyn EventRepository>,
        contribution_repository: Arc<dyn ContributionRepository>,
    ) -> Self {
        Self {
            event_repository,
            contribution_repository,
        }
    }

    pub async fn create_contribution(
        &self,
        request: CreateContributionRequest,
    ) -> Result<Contribution, ContributionServiceError> {
        let event_id = request
            .event_id
            .ok_or(ContributionServiceError::InvalidInput)?;
        let amount = request
            .amount
            .filter(|a| *a > 0.0)
            .ok_or(ContributionServiceError::InvalidInput)?;
        let contributor_name = request
            .contributor_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        if !self.event_repository.exists(event_id).await? {
            return Err(ContributionServiceError::EventNotFound);
        }

        Ok(self
            .contribution_repository
            .create(event_id, contributor_name, amount)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::contribution_repository::MockContributionRepository;
    use crate::repositories::event_repository::MockEventRepository;

    #[tokio::test]
    async fn test_create_contribution_rejects_zero_amount() {
        let service = ContributionService::new(
            Arc::new(MockEventRepository::new()),
            Arc::new(MockContributionRepository::new()),
        );

        let result = service
            .create_contribution(CreateContributionRequest {
                event_id: Some(1),
                contributor_name: None,
                amount: Some(0.0),
            })
            .await;

        assert!(matches!(result, Err(ContributionServiceError::InvalidInput)));
    }

    #[tokio::test]
    async fn test_create_contribution_rejects_negative_amount() {
        let service = ContributionService::new(
            Arc::new(MockEventRepository::new()),
            Arc::new(MockContributionRepository::new()),
        );

        let result = service
            .create_contribution(CreateContributionRequest {
                event_id: Some(1),
                contributor_name: None,
                amount: Some(-5.0),
            })
            .await;

        assert!(matches!(result, Err(ContributionServiceError::InvalidInput)));
    }

    #[tokio::test]
    async fn test_create_contribution_unknown_event_is_not_found() {
        let mut event_repo = MockEventRepository::new();
        event_repo
            .expect_exists()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(false) }));

        let service = ContributionService::new(
            Arc::new(event_repo),
            Arc::new(MockContributionRepository::new()),
        );

        let result = service
            .create_contribution(CreateContributionRequest {
                event_id: Some(9),
                contributor_name: Some("Grace".to_string()),
                amount: Some(25.0),
            })
            .await;

        assert!(matches!(
            result,
            Err(ContributionServiceError::EventNotFound)
        ));
    }
}
