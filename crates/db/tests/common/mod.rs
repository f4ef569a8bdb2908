//! Shared setup for repository integration tests.

use numo_db::AccountRepository;
use numo_db::migration::{Migrator, MigratorTrait};
use numo_shared::types::AccountId;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Opens a fresh in-memory SQLite database with the schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

/// Creates an account and returns its ID.
pub async fn create_account(db: &DatabaseConnection) -> AccountId {
    let username = format!("user-{}", &Uuid::new_v4().simple().to_string()[..8]);
    let account = AccountRepository::new(db.clone())
        .create("Test User", None, &username, "$argon2id$test_hash")
        .await
        .expect("Failed to create account");
    AccountId::from_uuid(account.id)
}
