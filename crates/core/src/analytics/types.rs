//! Analytics input and report types.

use numo_shared::types::{Cents, Period};
use serde::{Deserialize, Serialize};

use crate::budget::BudgetPlan;
use crate::ledger::{EntryKind, EntryStatus};

/// One ledger amount as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Revenue or expense.
    pub kind: EntryKind,
    /// Amount in cents.
    pub amount: Cents,
    /// Soft-delete status.
    pub status: EntryStatus,
}

impl PeriodEntry {
    /// Creates a live revenue entry.
    #[must_use]
    pub const fn revenue(amount: Cents) -> Self {
        Self {
            kind: EntryKind::Revenue,
            amount,
            status: EntryStatus::Active,
        }
    }

    /// Creates a live expense entry.
    #[must_use]
    pub const fn expense(amount: Cents) -> Self {
        Self {
            kind: EntryKind::Expense,
            amount,
            status: EntryStatus::Active,
        }
    }

    /// Marks the entry as tombstoned.
    #[must_use]
    pub const fn deleted(mut self) -> Self {
        self.status = EntryStatus::Deleted;
        self
    }
}

/// All ledger entries recorded for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntries {
    /// The period the entries belong to.
    pub period: Period,
    /// Entries, possibly including tombstoned ones.
    pub entries: Vec<PeriodEntry>,
}

impl PeriodEntries {
    /// Creates an entry set for a period.
    #[must_use]
    pub const fn new(period: Period, entries: Vec<PeriodEntry>) -> Self {
        Self { period, entries }
    }

    /// Creates an empty entry set.
    #[must_use]
    pub const fn empty(period: Period) -> Self {
        Self {
            period,
            entries: Vec::new(),
        }
    }

    /// Sum of live amounts of the given kind.
    #[must_use]
    pub fn live_total(&self, kind: EntryKind) -> Cents {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && e.status.is_active())
            .map(|e| e.amount)
            .sum()
    }
}

/// Direction of change against the previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// More than 5% above the previous month.
    Up,
    /// More than 5% below the previous month.
    Down,
    /// Within 5%, or no previous activity.
    Stable,
}

/// Actual totals for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualTotals {
    /// Sum of live revenues.
    pub revenue: Cents,
    /// Sum of live expenses.
    pub expenses: Cents,
    /// `revenue - expenses`.
    pub balance: Cents,
}

/// Planned totals from the budget plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTotals {
    /// Planned revenue.
    pub revenue: Cents,
    /// Sum of planned category expenses.
    pub expenses: Cents,
}

/// Signed `actual - planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variance {
    /// Revenue variance.
    pub revenue: Cents,
    /// Expense variance.
    pub expenses: Cents,
}

/// Month-over-month trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trends {
    /// Revenue trend.
    pub revenue: Trend,
    /// Expense trend.
    pub expenses: Trend,
}

/// Linear year-end projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projections {
    /// Projected annual revenue.
    pub revenue: Cents,
    /// Projected annual expenses.
    pub expenses: Cents,
}

/// Derived analytics for one plan. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Actual totals.
    pub actual: ActualTotals,
    /// Planned totals.
    pub planned: PlannedTotals,
    /// Actual minus planned.
    pub variance: Variance,
    /// Trends against the previous month.
    pub trends: Trends,
    /// Year-end projections.
    pub projections: Projections,
}

/// A plan together with its analytics, as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    /// The budget plan.
    #[serde(rename = "abstract")]
    pub plan: BudgetPlan,
    /// Its analytics.
    pub analytics: AnalyticsReport,
}
