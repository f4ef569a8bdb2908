//! Account repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};

use numo_shared::types::AccountId;

use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Username already registered.
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UsernameTaken` if the username is registered.
    pub async fn create(
        &self,
        name: &str,
        email: Option<&str>,
        username: &str,
        password_hash: &str,
    ) -> Result<accounts::Model, AccountError> {
        if self.username_exists(username).await? {
            return Err(AccountError::UsernameTaken(username.to_string()));
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            name: Set(name.trim().to_string()),
            email: Set(email.filter(|e| !e.is_empty()).map(String::from)),
            username: Set(username.trim().to_string()),
            password_hash: Set(password_hash.to_string()),
            password_reset_required: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        account.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AccountError::UsernameTaken(username.to_string())
            } else {
                AccountError::Database(e)
            }
        })
    }
}
