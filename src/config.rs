use std::env;

/// How issued magic links reach the requester.
///
/// `Inline` returns the raw token and link in the HTTP response instead of
/// emailing them, for local development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    Email,
    Inline,
}

#[derive(Debug, Clone)]
pub struct MagicLinkConfig {
    pub base_url: String,
    pub delivery: DeliveryChannel,
}

impl MagicLinkConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let delivery = match env::var("MAGIC_LINK_DELIVERY").as_deref() {
            Ok("inline") | Ok("inline-response") => DeliveryChannel::Inline,
            Ok("email") | Err(_) => DeliveryChannel::Email,
            Ok(other) => {
                tracing::warn!(
                    "Unknown MAGIC_LINK_DELIVERY value '{}'; defaulting to email",
                    other
                );
                DeliveryChannel::Email
            }
        };

        Self { base_url, delivery }
    }

    /// Verification link embedded in the magic-link email.
    pub fn verify_link(&self, token: &str) -> String {
        format!("{}/auth/verify?token={}", self.base_url, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_link_format() {
        let config = MagicLinkConfig {
            base_url: "https://festbook.example".to_string(),
            delivery: DeliveryChannel::Email,
        };
        assert_eq!(
            config.verify_link("abc123"),
            "https://festbook.example/auth/verify?token=abc123"
        );
    }
}
