use crate::config::{DeliveryChannel, MagicLinkConfig};
use crate::models::user::PublicUser;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::RepositoryError;
use crate::services::email_service::{EmailError, EmailService};
use crate::token;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Magic tokens live for 15 minutes.
pub const MAGIC_TOKEN_TTL_SECS: i64 = 15 * 60;
/// Sessions live for 30 days.
pub const SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("Failed to compile email regex")
});

#[derive(Debug, thiserror::Error)]
pub enum MagicLinkError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Name is required for new users")]
    MissingName,
    #[error("Token is required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Email error: {0}")]
    Email(#[from] EmailError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub struct IssueMagicLinkRequest {
    pub email: String,
    pub name: Option<String>,
}

pub struct IssuedMagicLink {
    pub token: String,
    pub link: String,
    pub expires_at: i64,
    pub delivery: DeliveryChannel,
}

pub struct VerifiedLogin {
    pub session_token: String,
    pub user: PublicUser,
}

pub struct MagicLinkService {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
    email_service: Box<dyn EmailService>,
    config: MagicLinkConfig,
}

impl MagicLinkService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
        email_service: Box<dyn EmailService>,
        config: MagicLinkConfig,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            email_service,
            config,
        }
    }

    /// Issue a fresh magic token for `email`, creating the user on first
    /// contact. Re-issuing supersedes any token issued earlier: only the
    /// latest token can verify.
    pub async fn issue(
        &self,
        request: IssueMagicLinkRequest,
    ) -> Result<IssuedMagicLink, MagicLinkError> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(MagicLinkError::MissingEmail);
        }
        if !EMAIL_REGEX.is_match(email) {
            return Err(MagicLinkError::InvalidEmail);
        }

        let magic_token = token::magic_token();
        let expires_at = Utc::now().timestamp() + MAGIC_TOKEN_TTL_SECS;

        match self.user_repository.find_by_email(email).await? {
            Some(_) => {
                self.user_repository
                    .set_magic_token(email, &magic_token, expires_at)
                    .await?;
            }
            None => {
                let name = request
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .ok_or(MagicLinkError::MissingName)?;

                self.user_repository
                    .create_with_magic_token(email, name, &magic_token, expires_at)
                    .await?;
            }
        }

        let link = self.config.verify_link(&magic_token);

        match self.config.delivery {
            DeliveryChannel::Email => {
                tracing::info!("Sending magic link email to: {}", email);
                self.email_service.send_magic_link(email, &link).await?;
            }
            DeliveryChannel::Inline => {
                tracing::debug!("Inline delivery enabled; returning magic link in response");
            }
        }

        Ok(IssuedMagicLink {
            token: magic_token,
            link,
            expires_at,
            delivery: self.config.delivery,
        })
    }

    /// Exchange a magic token for a session. The token is consumed with a
    /// conditional update before the session is minted, so it cannot be
    /// replayed even if two verifications race or session creation fails.
    pub async fn verify(&self, magic_token: &str) -> Result<VerifiedLogin, MagicLinkError> {
        let magic_token = magic_token.trim();
        if magic_token.is_empty() {
            return Err(MagicLinkError::MissingToken);
        }

        let now = Utc::now().timestamp();

        let user = self
            .user_repository
            .find_by_valid_magic_token(magic_token, now)
            .await?
            .ok_or(MagicLinkError::InvalidToken)?;

        let consumed = self
            .user_repository
            .consume_magic_token(user.id, magic_token)
            .await?;
        if !consumed {
            return Err(MagicLinkError::InvalidToken);
        }

        let session_token = token::session_token();
        let session_expires_at = now + SESSION_TTL_SECS;
        self.session_repository
            .create(user.id, &session_token, session_expires_at)
            .await?;

        tracing::info!("User {} logged in via magic link", user.id);

        Ok(VerifiedLogin {
            session_token,
            user: user.into(),
        })
    }
}
