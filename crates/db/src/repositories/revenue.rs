//! Revenue repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, Set,
};

use numo_core::ledger::{LedgerValidator, NewRevenue, RevenuePatch};
use numo_shared::types::{AccountId, Period, RevenueId};

use super::ledger::{LedgerRepoError, ensure_payment_option};
use super::{from_column, to_column};
use crate::entities::revenues;

/// Revenue repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RevenueRepository {
    db: DatabaseConnection,
}

impl RevenueRepository {
    /// Creates a new revenue repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live revenues of an account.
    fn live(account_id: AccountId) -> Select<revenues::Entity> {
        revenues::Entity::find()
            .filter(revenues::Column::AccountId.eq(account_id.into_inner()))
            .filter(revenues::Column::DeletedAt.is_null())
    }

    /// Creates a revenue.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::Invalid` for invalid fields and
    /// `LedgerRepoError::UnknownPaymentOption` for a foreign payment option.
    pub async fn create(
        &self,
        account_id: AccountId,
        input: &NewRevenue,
    ) -> Result<revenues::Model, LedgerRepoError> {
        let period = LedgerValidator::validate_revenue(input)?;
        ensure_payment_option(&self.db, account_id, input.payment_option_id).await?;

        let now = chrono::Utc::now().into();
        let revenue = revenues::ActiveModel {
            id: Set(RevenueId::new().into_inner()),
            account_id: Set(account_id.into_inner()),
            month: Set(to_column(period.month())),
            year: Set(period.year()),
            day: Set(to_column(input.day)),
            amount: Set(input.amount.value()),
            description: Set(input.description.trim().to_string()),
            payment_option_id: Set(input.payment_option_id.map(|p| p.into_inner())),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        Ok(revenue.insert(&self.db).await?)
    }

    /// Lists live revenues, optionally for one period, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        account_id: AccountId,
        period: Option<Period>,
    ) -> Result<Vec<revenues::Model>, DbErr> {
        let mut query = Self::live(account_id);
        if let Some(period) = period {
            query = query
                .filter(revenues::Column::Year.eq(period.year()))
                .filter(revenues::Column::Month.eq(to_column(period.month())));
        }

        query
            .order_by_desc(revenues::Column::Year)
            .order_by_desc(revenues::Column::Month)
            .order_by_desc(revenues::Column::Day)
            .order_by_desc(revenues::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a live revenue.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        account_id: AccountId,
        id: RevenueId,
    ) -> Result<Option<revenues::Model>, DbErr> {
        Self::live(account_id)
            .filter(revenues::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::NotFound` if the revenue is absent or deleted.
    pub async fn update(
        &self,
        account_id: AccountId,
        id: RevenueId,
        patch: &RevenuePatch,
    ) -> Result<revenues::Model, LedgerRepoError> {
        let revenue = self
            .find(account_id, id)
            .await?
            .ok_or(LedgerRepoError::NotFound(id.into_inner()))?;

        let current = Period::new(from_column(revenue.month), revenue.year)
            .map_err(|e| LedgerRepoError::Corrupt(e.to_string()))?;
        let period = LedgerValidator::validate_revenue_patch(patch, current)?;
        if let Some(payment_option_id) = patch.payment_option_id {
            ensure_payment_option(&self.db, account_id, payment_option_id).await?;
        }

        let mut active = revenue.into_active_model();
        active.month = Set(to_column(period.month()));
        active.year = Set(period.year());
        if let Some(day) = patch.day {
            active.day = Set(to_column(day));
        }
        if let Some(amount) = patch.amount {
            active.amount = Set(amount.value());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.trim().to_string());
        }
        if let Some(payment_option_id) = patch.payment_option_id {
            active.payment_option_id = Set(payment_option_id.map(|p| p.into_inner()));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Soft-deletes a revenue.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::NotFound` if the revenue is absent or deleted.
    pub async fn delete(&self, account_id: AccountId, id: RevenueId) -> Result<(), LedgerRepoError> {
        let revenue = self
            .find(account_id, id)
            .await?
            .ok_or(LedgerRepoError::NotFound(id.into_inner()))?;

        let now = chrono::Utc::now().into();
        let mut active = revenue.into_active_model();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }
}
