use crate::models::user::PublicUser;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::RepositoryError;
use chrono::Utc;
use std::sync::Arc;

/// Resolves bearer credentials to users and tears sessions down.
pub struct SessionService {
    session_repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// Resolve a credential to its user. A missing credential is not an
    /// error; the caller decides whether absence means unauthorized.
    /// Expired sessions look exactly like unknown ones.
    pub async fn resolve(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<PublicUser>, RepositoryError> {
        let Some(token) = credential else {
            return Ok(None);
        };

        let now = Utc::now().timestamp();
        self.session_repository
            .find_user_by_valid_token(token, now)
            .await
    }

    /// Delete the session behind `credential`, if any. Idempotent: a
    /// missing credential or an unknown token still succeeds.
    pub async fn logout(&self, credential: Option<&str>) -> Result<(), RepositoryError> {
        if let Some(token) = credential {
            self.session_repository.delete_by_token(token).await?;
        }

        Ok(())
    }
}
