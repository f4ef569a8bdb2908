//! Expense category repository.
//!
//! Categories are soft-deleted: deletion stamps `deleted_at` and every
//! lookup goes through [`CategoryRepository::live`].

use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use numo_core::ledger::{LedgerError, LedgerValidator};
use numo_core::numochat::NamedOption;
use numo_shared::types::{AccountId, CategoryId};

use crate::entities::expense_categories;

/// Error types for category and payment option operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Record not found or not owned by the account.
    #[error("Not found: {0}")]
    NotFound(Uuid),

    /// Invalid input.
    #[error(transparent)]
    Invalid(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live categories of an account.
    fn live(account_id: AccountId) -> Select<expense_categories::Entity> {
        expense_categories::Entity::find()
            .filter(expense_categories::Column::AccountId.eq(account_id.into_inner()))
            .filter(expense_categories::Column::DeletedAt.is_null())
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` for a blank name.
    pub async fn create(
        &self,
        account_id: AccountId,
        name: &str,
    ) -> Result<expense_categories::Model, CatalogError> {
        LedgerValidator::validate_name(name)?;

        let now = chrono::Utc::now().into();
        let category = expense_categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            account_id: Set(account_id.into_inner()),
            name: Set(name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        Ok(category.insert(&self.db).await?)
    }

    /// Lists live categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<expense_categories::Model>, DbErr> {
        Self::live(account_id)
            .order_by_asc(expense_categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a live category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        account_id: AccountId,
        id: CategoryId,
    ) -> Result<Option<expense_categories::Model>, DbErr> {
        Self::live(account_id)
            .filter(expense_categories::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the category is absent or deleted.
    pub async fn rename(
        &self,
        account_id: AccountId,
        id: CategoryId,
        name: &str,
    ) -> Result<expense_categories::Model, CatalogError> {
        LedgerValidator::validate_name(name)?;

        let category = self
            .find(account_id, id)
            .await?
            .ok_or(CatalogError::NotFound(id.into_inner()))?;

        let mut active = category.into_active_model();
        active.name = Set(name.trim().to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the category is absent or deleted.
    pub async fn delete(&self, account_id: AccountId, id: CategoryId) -> Result<(), CatalogError> {
        let category = self
            .find(account_id, id)
            .await?
            .ok_or(CatalogError::NotFound(id.into_inner()))?;

        let now = chrono::Utc::now().into();
        let mut active = category.into_active_model();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// IDs of the account's live categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn live_ids(&self, account_id: AccountId) -> Result<HashSet<CategoryId>, DbErr> {
        Ok(Self::live(account_id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| CategoryId::from_uuid(c.id))
            .collect())
    }

    /// Live categories as NumoChat options.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn named_options(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<NamedOption<CategoryId>>, DbErr> {
        Ok(self
            .list(account_id)
            .await?
            .into_iter()
            .map(|c| NamedOption {
                id: CategoryId::from_uuid(c.id),
                name: c.name,
            })
            .collect())
    }
}
