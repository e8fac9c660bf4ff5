use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, UserProfile, UserRole};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn first_contact_assigns_user_role() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(engine.caller_role("alice").await.unwrap(), UserRole::User);
    assert_eq!(engine.caller_role("alice").await.unwrap(), UserRole::User);
    assert!(!engine.is_admin("alice").await.unwrap());
}

#[tokio::test]
async fn blank_caller_has_no_role() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.caller_role("").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn admin_assigns_roles() {
    let (engine, _db) = engine_with_db().await;
    engine.grant_role("root", UserRole::Admin).await.unwrap();
    assert!(engine.is_admin("root").await.unwrap());

    engine
        .assign_role("bob", UserRole::Guest, "root")
        .await
        .unwrap();
    assert_eq!(engine.caller_role("bob").await.unwrap(), UserRole::Guest);

    engine
        .assign_role(" bob ", UserRole::Admin, "root")
        .await
        .unwrap();
    assert!(engine.is_admin("bob").await.unwrap());
}

#[tokio::test]
async fn non_admin_cannot_assign_roles() {
    let (engine, _db) = engine_with_db().await;
    engine.caller_role("bob").await.unwrap();

    let err = engine
        .assign_role("bob", UserRole::Admin, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    assert_eq!(engine.caller_role("bob").await.unwrap(), UserRole::User);

    let err = engine
        .assign_role("alice", UserRole::Admin, "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    assert!(!engine.is_admin("alice").await.unwrap());
}

#[tokio::test]
async fn guests_keep_role_queries() {
    let (engine, _db) = engine_with_db().await;
    engine.grant_role("mallory", UserRole::Guest).await.unwrap();

    assert_eq!(engine.caller_role("mallory").await.unwrap(), UserRole::Guest);
    assert!(!engine.is_admin("mallory").await.unwrap());

    let err = engine.caller_profile("mallory").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn profile_roundtrip_and_open_read() {
    let (engine, _db) = engine_with_db().await;

    assert_eq!(engine.caller_profile("alice").await.unwrap(), None);

    engine.save_profile(" Alice ", "alice").await.unwrap();
    engine.save_profile("Alice Rossi", "alice").await.unwrap();

    let expected = UserProfile {
        name: "Alice Rossi".to_string(),
    };
    assert_eq!(
        engine.caller_profile("alice").await.unwrap(),
        Some(expected.clone())
    );
    assert_eq!(
        engine.user_profile("alice", "bob").await.unwrap(),
        Some(expected)
    );
    assert_eq!(engine.user_profile("carol", "bob").await.unwrap(), None);
}

#[tokio::test]
async fn blank_profile_name_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.save_profile("   ", "alice").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert_eq!(engine.caller_profile("alice").await.unwrap(), None);
}
