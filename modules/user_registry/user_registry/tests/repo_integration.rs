//! `SeaOrmUsersRepository` against a real `SQLite` schema.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use user_registry::config::DatabaseConfig;
use user_registry::domain::error::DomainError;
use user_registry::domain::repo::UsersRepository;
use user_registry::infra::storage::{self, SeaOrmUsersRepository};
use user_registry::{NewUser, UserUpdate};

async fn repo() -> SeaOrmUsersRepository {
    let db = storage::db::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    storage::migrate(&db).await.unwrap();
    SeaOrmUsersRepository::new(db)
}

#[tokio::test]
async fn insert_assigns_increasing_ids_never_reused() {
    let repo = repo().await;

    let a = repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();
    let b = repo.insert(&NewUser::new("B", "b@email.com")).await.unwrap();
    assert!(a.id > 0);
    assert!(b.id > a.id);

    assert!(repo.delete_by_email("b@email.com").await.unwrap());
    let c = repo.insert(&NewUser::new("C", "c@email.com")).await.unwrap();
    assert!(c.id > b.id);
}

#[tokio::test]
async fn insert_duplicate_maps_unique_violation() {
    let repo = repo().await;
    repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();

    let err = repo
        .insert(&NewUser::new("B", "a@email.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyExists { .. }), "{err:?}");
}

#[tokio::test]
async fn find_is_exact_match() {
    let repo = repo().await;
    repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();

    assert!(repo.find_by_email("a@email.com").await.unwrap().is_some());
    assert!(repo.find_by_email("A@email.com").await.unwrap().is_none());
    assert!(repo.find_by_email("b@email.com").await.unwrap().is_none());
}

#[tokio::test]
async fn replace_targets_by_id_then_by_email() {
    let repo = repo().await;
    let a = repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();
    repo.insert(&NewUser::new("B", "b@email.com")).await.unwrap();

    let renamed = repo
        .replace(&UserUpdate::by_email("A2", "a@email.com"))
        .await
        .unwrap();
    assert_eq!(renamed.id, a.id);
    assert_eq!(renamed.name, "A2");

    let moved = repo
        .replace(&UserUpdate::by_id(a.id, "A3", "a3@email.com"))
        .await
        .unwrap();
    assert_eq!(moved.id, a.id);
    assert_eq!(moved.email, "a3@email.com");

    let taken = repo
        .replace(&UserUpdate::by_id(a.id, "A4", "b@email.com"))
        .await
        .unwrap_err();
    assert!(matches!(taken, DomainError::EmailAlreadyExists { .. }), "{taken:?}");

    let missing = repo
        .replace(&UserUpdate::by_id(9999, "X", "x@email.com"))
        .await
        .unwrap_err();
    assert!(matches!(missing, DomainError::UserNotFound { .. }));

    // An unknown id falls back to the email.
    let stale = repo
        .replace(&UserUpdate::by_id(9999, "A5", "a3@email.com"))
        .await
        .unwrap();
    assert_eq!(stale.id, a.id);
    assert_eq!(stale.name, "A5");

    // A non-positive id falls back to the email.
    let fallback = repo
        .replace(&UserUpdate {
            id: Some(0),
            name: "B2".to_owned(),
            email: "b@email.com".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(fallback.name, "B2");
}

#[tokio::test]
async fn delete_reports_whether_a_row_matched() {
    let repo = repo().await;
    repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();

    assert!(repo.delete_by_email("a@email.com").await.unwrap());
    assert!(!repo.delete_by_email("a@email.com").await.unwrap());
    repo.ping().await.unwrap();
}

#[tokio::test]
async fn reset_empties_the_store() {
    let db = storage::db::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .unwrap();
    storage::migrate(&db).await.unwrap();
    let repo = SeaOrmUsersRepository::new(db.clone());
    repo.insert(&NewUser::new("A", "a@email.com")).await.unwrap();

    storage::reset(&db).await.unwrap();
    assert!(repo.find_by_email("a@email.com").await.unwrap().is_none());
}
