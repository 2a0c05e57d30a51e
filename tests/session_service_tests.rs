use chrono::Utc;
use festbook::{
    repositories::SqliteSessionRepository, services::SessionService, test_utils::test_helpers,
};
use std::sync::Arc;

#[tokio::test]
async fn test_resolve_valid_session_returns_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let user_id = test_helpers::insert_test_user(&pool, "ada@example.com", "Ada")
        .await
        .unwrap();
    let expires = Utc::now().timestamp() + 3600;
    test_helpers::insert_test_session(&pool, user_id, "live-session", expires)
        .await
        .unwrap();

    let service = SessionService::new(Arc::new(SqliteSessionRepository::new(pool.clone())));

    let user = service
        .resolve(Some("live-session"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.name, "Ada");
}

#[tokio::test]
async fn test_resolve_expired_session_looks_nonexistent() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let user_id = test_helpers::insert_test_user(&pool, "ada@example.com", "Ada")
        .await
        .unwrap();
    let expired = Utc::now().timestamp() - 1;
    test_helpers::insert_test_session(&pool, user_id, "dead-session", expired)
        .await
        .unwrap();

    let service = SessionService::new(Arc::new(SqliteSessionRepository::new(pool.clone())));

    assert!(service
        .resolve(Some("dead-session"))
        .await
        .unwrap()
        .is_none());
    assert!(service.resolve(Some("never-existed")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_deletes_session_and_is_idempotent() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let user_id = test_helpers::insert_test_user(&pool, "ada@example.com", "Ada")
        .await
        .unwrap();
    let expires = Utc::now().timestamp() + 3600;
    test_helpers::insert_test_session(&pool, user_id, "session-a", expires)
        .await
        .unwrap();

    let service = SessionService::new(Arc::new(SqliteSessionRepository::new(pool.clone())));

    service.logout(Some("session-a")).await.unwrap();
    assert!(service.resolve(Some("session-a")).await.unwrap().is_none());

    // Deleting again, or with no credential at all, still succeeds
    service.logout(Some("session-a")).await.unwrap();
    service.logout(None).await.unwrap();
}

#[tokio::test]
async fn test_many_sessions_per_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let user_id = test_helpers::insert_test_user(&pool, "ada@example.com", "Ada")
        .await
        .unwrap();
    let expires = Utc::now().timestamp() + 3600;
    test_helpers::insert_test_session(&pool, user_id, "laptop", expires)
        .await
        .unwrap();
    test_helpers::insert_test_session(&pool, user_id, "phone", expires)
        .await
        .unwrap();

    let service = SessionService::new(Arc::new(SqliteSessionRepository::new(pool.clone())));

    // Logging out one device leaves the other session live
    service.logout(Some("laptop")).await.unwrap();
    assert!(service.resolve(Some("laptop")).await.unwrap().is_none());
    assert!(service.resolve(Some("phone")).await.unwrap().is_some());
}
