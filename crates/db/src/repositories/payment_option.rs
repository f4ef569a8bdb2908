//! Payment option repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, Set,
};

use numo_core::ledger::LedgerValidator;
use numo_core::numochat::NamedOption;
use numo_shared::types::{AccountId, PaymentOptionId};

use super::category::CatalogError;
use crate::entities::payment_options;

/// Payment option repository.
#[derive(Debug, Clone)]
pub struct PaymentOptionRepository {
    db: DatabaseConnection,
}

impl PaymentOptionRepository {
    /// Creates a new payment option repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live(account_id: AccountId) -> Select<payment_options::Entity> {
        payment_options::Entity::find()
            .filter(payment_options::Column::AccountId.eq(account_id.into_inner()))
            .filter(payment_options::Column::DeletedAt.is_null())
    }

    /// Creates a payment option.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` for a blank name.
    pub async fn create(
        &self,
        account_id: AccountId,
        name: &str,
    ) -> Result<payment_options::Model, CatalogError> {
        LedgerValidator::validate_name(name)?;

        let now = chrono::Utc::now().into();
        let option = payment_options::ActiveModel {
            id: Set(PaymentOptionId::new().into_inner()),
            account_id: Set(account_id.into_inner()),
            name: Set(name.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        Ok(option.insert(&self.db).await?)
    }

    /// Lists live payment options ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, account_id: AccountId) -> Result<Vec<payment_options::Model>, DbErr> {
        Self::live(account_id)
            .order_by_asc(payment_options::Column::Name)
            .all(&self.db)
            .await
    }

    /// Finds a live payment option.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        account_id: AccountId,
        id: PaymentOptionId,
    ) -> Result<Option<payment_options::Model>, DbErr> {
        Self::live(account_id)
            .filter(payment_options::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Renames a payment option.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if absent or deleted.
    pub async fn rename(
        &self,
        account_id: AccountId,
        id: PaymentOptionId,
        name: &str,
    ) -> Result<payment_options::Model, CatalogError> {
        LedgerValidator::validate_name(name)?;

        let option = self
            .find(account_id, id)
            .await?
            .ok_or(CatalogError::NotFound(id.into_inner()))?;

        let mut active = option.into_active_model();
        active.name = Set(name.trim().to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a payment option.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if absent or deleted.
    pub async fn delete(
        &self,
        account_id: AccountId,
        id: PaymentOptionId,
    ) -> Result<(), CatalogError> {
        let option = self
            .find(account_id, id)
            .await?
            .ok_or(CatalogError::NotFound(id.into_inner()))?;

        let now = chrono::Utc::now().into();
        let mut active = option.into_active_model();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Live payment options as NumoChat options.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn named_options(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<NamedOption<PaymentOptionId>>, DbErr> {
        Ok(self
            .list(account_id)
            .await?
            .into_iter()
            .map(|o| NamedOption {
                id: PaymentOptionId::from_uuid(o.id),
                name: o.name,
            })
            .collect())
    }
}
