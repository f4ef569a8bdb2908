//! Expense repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Select, Set,
};
use uuid::Uuid;

use numo_core::ledger::{ExpensePatch, LedgerValidator, Metadata, NewExpense};
use numo_shared::types::{AccountId, CategoryId, ExpenseId, Period};

use super::ledger::{LedgerRepoError, ensure_category, ensure_payment_option};
use super::{from_column, to_column};
use crate::entities::{expense_categories, expenses, payment_options};

/// Filters for listing expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// Only this period.
    pub period: Option<Period>,
    /// Only this category.
    pub category_id: Option<CategoryId>,
}

/// Expense joined with its category and payment option names.
#[derive(Debug, Clone)]
pub struct ExpenseWithRefs {
    /// Expense record.
    pub expense: expenses::Model,
    /// Decoded metadata.
    pub metadata: Metadata,
    /// Category name, if any.
    pub category_name: Option<String>,
    /// Payment option name, if any.
    pub payment_option_name: Option<String>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Live expenses of an account.
    fn live(account_id: AccountId) -> Select<expenses::Entity> {
        expenses::Entity::find()
            .filter(expenses::Column::AccountId.eq(account_id.into_inner()))
            .filter(expenses::Column::DeletedAt.is_null())
    }

    /// Creates an expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::Invalid` for invalid fields and
    /// `LedgerRepoError::UnknownCategory`/`UnknownPaymentOption` for
    /// references the account does not own.
    pub async fn create(
        &self,
        account_id: AccountId,
        input: &NewExpense,
    ) -> Result<ExpenseWithRefs, LedgerRepoError> {
        let period = LedgerValidator::validate_expense(input)?;
        ensure_category(&self.db, account_id, input.category_id).await?;
        ensure_payment_option(&self.db, account_id, input.payment_option_id).await?;

        let metadata = serde_json::to_value(&input.metadata)
            .map_err(|e| LedgerRepoError::Corrupt(e.to_string()))?;

        let now = chrono::Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(ExpenseId::new().into_inner()),
            account_id: Set(account_id.into_inner()),
            month: Set(to_column(period.month())),
            year: Set(period.year()),
            day: Set(to_column(input.day)),
            amount: Set(input.amount.value()),
            description: Set(input.description.trim().to_string()),
            category_id: Set(input.category_id.map(|c| c.into_inner())),
            payment_option_id: Set(input.payment_option_id.map(|p| p.into_inner())),
            fixed: Set(input.fixed),
            metadata: Set(metadata),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = expense.insert(&self.db).await?;
        let mut joined = self.attach_refs(vec![model]).await?;
        joined.pop().ok_or(LedgerRepoError::Corrupt("inserted expense vanished".into()))
    }

    /// Lists live expenses newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        account_id: AccountId,
        filter: ExpenseFilter,
    ) -> Result<Vec<ExpenseWithRefs>, LedgerRepoError> {
        let mut query = Self::live(account_id);
        if let Some(period) = filter.period {
            query = query
                .filter(expenses::Column::Year.eq(period.year()))
                .filter(expenses::Column::Month.eq(to_column(period.month())));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(expenses::Column::CategoryId.eq(category_id.into_inner()));
        }

        let rows = query
            .order_by_desc(expenses::Column::Year)
            .order_by_desc(expenses::Column::Month)
            .order_by_desc(expenses::Column::Day)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.attach_refs(rows).await
    }

    /// Finds a live expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        account_id: AccountId,
        id: ExpenseId,
    ) -> Result<Option<ExpenseWithRefs>, LedgerRepoError> {
        let Some(model) = self.find_model(account_id, id).await? else {
            return Ok(None);
        };
        Ok(self.attach_refs(vec![model]).await?.pop())
    }

    async fn find_model(
        &self,
        account_id: AccountId,
        id: ExpenseId,
    ) -> Result<Option<expenses::Model>, DbErr> {
        Self::live(account_id)
            .filter(expenses::Column::Id.eq(id.into_inner()))
            .one(&self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::NotFound` if the expense is absent or deleted.
    pub async fn update(
        &self,
        account_id: AccountId,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> Result<ExpenseWithRefs, LedgerRepoError> {
        let expense = self
            .find_model(account_id, id)
            .await?
            .ok_or(LedgerRepoError::NotFound(id.into_inner()))?;

        let current = Period::new(from_column(expense.month), expense.year)
            .map_err(|e| LedgerRepoError::Corrupt(e.to_string()))?;
        let period = LedgerValidator::validate_expense_patch(patch, current)?;
        if let Some(category_id) = patch.category_id {
            ensure_category(&self.db, account_id, category_id).await?;
        }
        if let Some(payment_option_id) = patch.payment_option_id {
            ensure_payment_option(&self.db, account_id, payment_option_id).await?;
        }

        let mut active = expense.into_active_model();
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
        if let Some(category_id) = patch.category_id {
            active.category_id = Set(category_id.map(|c| c.into_inner()));
        }
        if let Some(payment_option_id) = patch.payment_option_id {
            active.payment_option_id = Set(payment_option_id.map(|p| p.into_inner()));
        }
        if let Some(fixed) = patch.fixed {
            active.fixed = Set(fixed);
        }
        if let Some(metadata) = &patch.metadata {
            let value = serde_json::to_value(metadata)
                .map_err(|e| LedgerRepoError::Corrupt(e.to_string()))?;
            active.metadata = Set(value);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await?;
        let mut joined = self.attach_refs(vec![model]).await?;
        joined.pop().ok_or(LedgerRepoError::NotFound(id.into_inner()))
    }

    /// Soft-deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `LedgerRepoError::NotFound` if the expense is absent or deleted.
    pub async fn delete(&self, account_id: AccountId, id: ExpenseId) -> Result<(), LedgerRepoError> {
        let expense = self
            .find_model(account_id, id)
            .await?
            .ok_or(LedgerRepoError::NotFound(id.into_inner()))?;

        let now = chrono::Utc::now().into();
        let mut active = expense.into_active_model();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(&self.db).await?;

        Ok(())
    }

    /// Resolves category and payment option names for a batch of expenses.
    async fn attach_refs(
        &self,
        rows: Vec<expenses::Model>,
    ) -> Result<Vec<ExpenseWithRefs>, LedgerRepoError> {
        let category_ids: Vec<Uuid> = rows.iter().filter_map(|e| e.category_id).collect();
        let option_ids: Vec<Uuid> = rows.iter().filter_map(|e| e.payment_option_id).collect();

        // Names of soft-deleted references are still shown on old expenses.
        let categories: HashMap<Uuid, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            expense_categories::Entity::find()
                .filter(expense_categories::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };
        let options: HashMap<Uuid, String> = if option_ids.is_empty() {
            HashMap::new()
        } else {
            payment_options::Entity::find()
                .filter(payment_options::Column::Id.is_in(option_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|o| (o.id, o.name))
                .collect()
        };

        rows.into_iter()
            .map(|expense| {
                let metadata: Metadata = serde_json::from_value(expense.metadata.clone())
                    .map_err(|e| LedgerRepoError::Corrupt(e.to_string()))?;
                Ok(ExpenseWithRefs {
                    category_name: expense.category_id.and_then(|id| categories.get(&id).cloned()),
                    payment_option_name: expense
                        .payment_option_id
                        .and_then(|id| options.get(&id).cloned()),
                    metadata,
                    expense,
                })
            })
            .collect()
    }
}
