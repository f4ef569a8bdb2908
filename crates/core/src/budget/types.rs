//! Budget plan domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use numo_shared::types::{AbstractId, AccountId, CategoryId, Cents, Period};
use serde::{Deserialize, Serialize};

/// Free-form notes attached to a plan.
pub type Notes = BTreeMap<String, String>;

/// Planned spending for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExpense {
    /// Expense category.
    pub category_id: CategoryId,
    /// Planned amount in cents.
    pub planned: Cents,
}

/// A monthly budget plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Plan ID.
    pub id: AbstractId,
    /// Owning account.
    pub account_id: AccountId,
    /// Display name.
    pub name: String,
    /// Budget period.
    pub period: Period,
    /// Planned revenue in cents.
    pub planned_revenue: Cents,
    /// Planned expenses by category.
    pub planned_expenses: Vec<PlannedExpense>,
    /// Free-form notes.
    pub notes: Notes,
    /// Created timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BudgetPlan {
    /// Sum of every category's planned figure.
    #[must_use]
    pub fn planned_expenses_total(&self) -> Cents {
        self.planned_expenses.iter().map(|p| p.planned).sum()
    }
}

/// Input for creating a budget plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudgetPlanInput {
    /// Display name.
    pub name: String,
    /// Budget month (1-12).
    pub month: u32,
    /// Budget year.
    pub year: i32,
    /// Planned revenue in cents.
    pub planned_revenue: Cents,
    /// Planned expenses by category.
    #[serde(default)]
    pub planned_expenses: Vec<PlannedExpense>,
    /// Initial notes.
    #[serde(default)]
    pub notes: Notes,
}
