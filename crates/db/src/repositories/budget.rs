//! Budget plan ("abstract") repository.
//!
//! Planned expenses live in `abstract_expense_plans`, one row per category.
//! Plans are loaded into [`BudgetPlan`] so the analytics engine never sees
//! database types.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use numo_core::analytics::{BudgetSource, SourceError};
use numo_core::budget::{BudgetError, BudgetPlan, BudgetService, CreateBudgetPlanInput, Notes, PlannedExpense};
use numo_shared::types::{AbstractId, AccountId, CategoryId, Cents, Period};

use super::category::CategoryRepository;
use super::{from_column, to_column};
use crate::entities::{abstract_expense_plans, abstracts};

/// Error types for budget plan operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetRepoError {
    /// Domain rule violated.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Stored data could not be decoded.
    #[error("Corrupt stored plan: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Builds a domain plan from its rows.
pub(crate) fn to_plan(
    model: abstracts::Model,
    lines: Vec<abstract_expense_plans::Model>,
) -> Result<BudgetPlan, BudgetRepoError> {
    let period = Period::new(from_column(model.month), model.year)
        .map_err(|e| BudgetRepoError::Corrupt(e.to_string()))?;
    let notes: Notes = serde_json::from_value(model.notes)
        .map_err(|e| BudgetRepoError::Corrupt(e.to_string()))?;

    Ok(BudgetPlan {
        id: AbstractId::from_uuid(model.id),
        account_id: AccountId::from_uuid(model.account_id),
        name: model.name,
        period,
        planned_revenue: Cents::new(model.planned_revenue),
        planned_expenses: lines
            .into_iter()
            .map(|line| PlannedExpense {
                category_id: CategoryId::from_uuid(line.category_id),
                planned: Cents::new(line.planned),
            })
            .collect(),
        notes,
        created_at: model.created_at.to_utc(),
        updated_at: model.updated_at.to_utc(),
    })
}

/// Budget plan repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a plan with its planned expenses.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::DuplicatePeriod` if the account already has a plan
    /// for the period, or another `BudgetError` for invalid input.
    pub async fn create(
        &self,
        account_id: AccountId,
        input: &CreateBudgetPlanInput,
    ) -> Result<BudgetPlan, BudgetRepoError> {
        let known = CategoryRepository::new(self.db.clone())
            .live_ids(account_id)
            .await?;
        let period = BudgetService::validate_create(input, &known)?;

        if self.find_model(account_id, period).await?.is_some() {
            return Err(BudgetError::DuplicatePeriod(period).into());
        }

        let notes = serde_json::to_value(&input.notes)
            .map_err(|e| BudgetRepoError::Corrupt(e.to_string()))?;
        let now = chrono::Utc::now().into();
        let abstract_id = AbstractId::new().into_inner();

        let txn = self.db.begin().await?;

        let model = abstracts::ActiveModel {
            id: Set(abstract_id),
            account_id: Set(account_id.into_inner()),
            name: Set(input.name.trim().to_string()),
            month: Set(to_column(period.month())),
            year: Set(period.year()),
            planned_revenue: Set(input.planned_revenue.value()),
            notes: Set(notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent create for the same period.
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                BudgetRepoError::Budget(BudgetError::DuplicatePeriod(period))
            } else {
                BudgetRepoError::Database(e)
            }
        })?;

        let mut lines = Vec::with_capacity(input.planned_expenses.len());
        for planned in &input.planned_expenses {
            let line = abstract_expense_plans::ActiveModel {
                id: Set(Uuid::now_v7()),
                abstract_id: Set(abstract_id),
                category_id: Set(planned.category_id.into_inner()),
                planned: Set(planned.planned.value()),
            }
            .insert(&txn)
            .await?;
            lines.push(line);
        }

        txn.commit().await?;

        debug!(account_id = %account_id, period = %period, "budget plan created");

        to_plan(model, lines)
    }

    /// Lists an account's plans ordered by year then month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, account_id: AccountId) -> Result<Vec<BudgetPlan>, BudgetRepoError> {
        let models = abstracts::Entity::find()
            .filter(abstracts::Column::AccountId.eq(account_id.into_inner()))
            .order_by_asc(abstracts::Column::Year)
            .order_by_asc(abstracts::Column::Month)
            .all(&self.db)
            .await?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut lines_by_plan: HashMap<Uuid, Vec<abstract_expense_plans::Model>> = HashMap::new();
        if !ids.is_empty() {
            for line in abstract_expense_plans::Entity::find()
                .filter(abstract_expense_plans::Column::AbstractId.is_in(ids))
                .all(&self.db)
                .await?
            {
                lines_by_plan.entry(line.abstract_id).or_default().push(line);
            }
        }

        models
            .into_iter()
            .map(|m| {
                let lines = lines_by_plan.remove(&m.id).unwrap_or_default();
                to_plan(m, lines)
            })
            .collect()
    }

    async fn find_model(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<Option<abstracts::Model>, DbErr> {
        abstracts::Entity::find()
            .filter(abstracts::Column::AccountId.eq(account_id.into_inner()))
            .filter(abstracts::Column::Year.eq(period.year()))
            .filter(abstracts::Column::Month.eq(to_column(period.month())))
            .one(&self.db)
            .await
    }

    async fn load(&self, model: abstracts::Model) -> Result<BudgetPlan, BudgetRepoError> {
        let lines = abstract_expense_plans::Entity::find()
            .filter(abstract_expense_plans::Column::AbstractId.eq(model.id))
            .all(&self.db)
            .await?;
        to_plan(model, lines)
    }

    /// Finds an account's plan for a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_period(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<Option<BudgetPlan>, BudgetRepoError> {
        match self.find_model(account_id, period).await? {
            Some(model) => Ok(Some(self.load(model).await?)),
            None => Ok(None),
        }
    }

    /// Replaces a plan's notes.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if the plan is absent or owned by
    /// another account.
    pub async fn update_notes(
        &self,
        account_id: AccountId,
        id: AbstractId,
        notes: &Notes,
    ) -> Result<BudgetPlan, BudgetRepoError> {
        BudgetService::validate_notes(notes)?;

        let model = abstracts::Entity::find_by_id(id.into_inner())
            .filter(abstracts::Column::AccountId.eq(account_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(BudgetError::NotFound(id))?;

        let value =
            serde_json::to_value(notes).map_err(|e| BudgetRepoError::Corrupt(e.to_string()))?;

        let mut active = model.into_active_model();
        active.notes = Set(value);
        active.updated_at = Set(chrono::Utc::now().into());
        let updated = active.update(&self.db).await?;

        self.load(updated).await
    }
}

#[async_trait]
impl BudgetSource for BudgetRepository {
    async fn get_plan(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<Option<BudgetPlan>, SourceError> {
        Ok(self.find_by_period(account_id, period).await?)
    }
}
