//! Integration tests for the account repository.

mod common;

use numo_db::repositories::AccountError;
use numo_db::AccountRepository;
use numo_shared::types::AccountId;

#[tokio::test]
async fn test_account_create_and_find() {
    let db = common::setup_db().await;
    let repo = AccountRepository::new(db.clone());

    let account = repo
        .create("Maria", Some("maria@example.com"), "maria", "$argon2id$hash")
        .await
        .expect("Failed to create account");

    assert_eq!(account.username, "maria");
    assert_eq!(account.email.as_deref(), Some("maria@example.com"));
    assert!(!account.password_reset_required);

    let by_name = repo
        .find_by_username("maria")
        .await
        .unwrap()
        .expect("Account should exist");
    assert_eq!(by_name.id, account.id);

    let by_id = repo
        .find_by_id(AccountId::from_uuid(account.id))
        .await
        .unwrap()
        .expect("Account should exist");
    assert_eq!(by_id.name, "Maria");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let db = common::setup_db().await;
    let repo = AccountRepository::new(db.clone());

    repo.create("Maria", None, "maria", "$argon2id$hash")
        .await
        .unwrap();
    let second = repo.create("Other", None, "maria", "$argon2id$hash").await;

    assert!(matches!(second, Err(AccountError::UsernameTaken(_))));
}

#[tokio::test]
async fn test_empty_email_is_stored_as_none() {
    let db = common::setup_db().await;
    let repo = AccountRepository::new(db.clone());

    let account = repo
        .create("Maria", Some(""), "maria", "$argon2id$hash")
        .await
        .unwrap();

    assert!(account.email.is_none());
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}
