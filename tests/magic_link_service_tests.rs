use chrono::Utc;
use festbook::{
    config::{DeliveryChannel, MagicLinkConfig},
    repositories::{
        user_repository::UserRepository, SqliteSessionRepository, SqliteUserRepository,
    },
    services::{
        email_service::MockEmailService,
        magic_link_service::{IssueMagicLinkRequest, MagicLinkError, MagicLinkService},
    },
    test_utils::test_helpers,
    token,
};
use sqlx::SqlitePool;
use std::sync::Arc;

fn build_service(pool: &SqlitePool) -> MagicLinkService {
    MagicLinkService::new(
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteSessionRepository::new(pool.clone())),
        Box::new(MockEmailService::new()),
        MagicLinkConfig {
            base_url: "http://localhost:8080".to_string(),
            delivery: DeliveryChannel::Inline,
        },
    )
}

fn issue_request(email: &str, name: Option<&str>) -> IssueMagicLinkRequest {
    IssueMagicLinkRequest {
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
    }
}

#[tokio::test]
async fn test_issue_without_name_fails_for_new_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let result = service.issue(issue_request("new@example.com", None)).await;
    assert!(matches!(result, Err(MagicLinkError::MissingName)));

    // No user row was created
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_issue_creates_user_with_token_and_expiry() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let before = Utc::now().timestamp();
    let issued = service
        .issue(issue_request("new@example.com", Some("Ada")))
        .await
        .unwrap();

    assert_eq!(issued.token.len(), token::MAGIC_TOKEN_LENGTH);

    let repo = SqliteUserRepository::new(pool.clone());
    let user = repo.find_by_email("new@example.com").await.unwrap().unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.magic_token.as_deref(), Some(issued.token.as_str()));

    // Expiry lands ~900 seconds out
    let expires_at = user.magic_token_expires_at.unwrap();
    assert!(expires_at >= before + 890);
    assert!(expires_at <= Utc::now().timestamp() + 910);
}

#[tokio::test]
async fn test_reissue_supersedes_previous_token() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let first = service
        .issue(issue_request("ada@example.com", Some("Ada")))
        .await
        .unwrap();
    let second = service
        .issue(issue_request("ada@example.com", None))
        .await
        .unwrap();

    assert_ne!(first.token, second.token);

    // Only one user row, holding only the latest token
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let result = service.verify(&first.token).await;
    assert!(matches!(result, Err(MagicLinkError::InvalidToken)));

    let login = service.verify(&second.token).await.unwrap();
    assert_eq!(login.user.email, "ada@example.com");
}

#[tokio::test]
async fn test_verify_is_single_use() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let issued = service
        .issue(issue_request("ada@example.com", Some("Ada")))
        .await
        .unwrap();

    service.verify(&issued.token).await.unwrap();

    let replay = service.verify(&issued.token).await;
    assert!(matches!(replay, Err(MagicLinkError::InvalidToken)));
}

#[tokio::test]
async fn test_verify_expired_token_fails_even_when_still_stored() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let issued = service
        .issue(issue_request("ada@example.com", Some("Ada")))
        .await
        .unwrap();

    let past = Utc::now().timestamp() - 10;
    sqlx::query("UPDATE users SET magic_token_expires_at = ? WHERE email = ?")
        .bind(past)
        .bind("ada@example.com")
        .execute(&pool)
        .await
        .unwrap();

    let result = service.verify(&issued.token).await;
    assert!(matches!(result, Err(MagicLinkError::InvalidToken)));

    // The token value itself was never consumed, only its expiry passed
    let stored: Option<String> =
        sqlx::query_scalar("SELECT magic_token FROM users WHERE email = ?")
            .bind("ada@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stored.as_deref(), Some(issued.token.as_str()));
}

#[tokio::test]
async fn test_verify_mints_30_day_session() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = build_service(&pool);

    let issued = service
        .issue(issue_request("ada@example.com", Some("Ada")))
        .await
        .unwrap();

    let before = Utc::now().timestamp();
    let login = service.verify(&issued.token).await.unwrap();

    assert_eq!(login.session_token.len(), token::SESSION_TOKEN_LENGTH);

    let expires_at: i64 =
        sqlx::query_scalar("SELECT expires_at FROM sessions WHERE session_token = ?")
            .bind(&login.session_token)
            .fetch_one(&pool)
            .await
            .unwrap();

    let thirty_days = 30 * 24 * 60 * 60;
    assert!(expires_at >= before + thirty_days - 5);
    assert!(expires_at <= Utc::now().timestamp() + thirty_days + 5);
}

// Token consumption is deliberately a conditional update rather than a
// separate read-then-clear: when two verifications race, exactly one
// observes a nonzero affected-row count. The plain look-then-write
// version would let both mint sessions.
#[tokio::test]
async fn test_consume_magic_token_is_conditional() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repo = SqliteUserRepository::new(pool.clone());

    let user = repo
        .create_with_magic_token("ada@example.com", "Ada", "the-token", i64::MAX)
        .await
        .unwrap();

    let first = repo.consume_magic_token(user.id, "the-token").await.unwrap();
    assert!(first);

    let second = repo.consume_magic_token(user.id, "the-token").await.unwrap();
    assert!(!second);
}
