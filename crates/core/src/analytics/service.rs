//! Analytics service: loads inputs and runs the engine.

use numo_shared::types::{AccountId, Period};

use super::engine::AnalyticsEngine;
use super::error::AnalyticsError;
use super::source::{BudgetSource, LedgerSource};
use super::types::PlanReport;

/// Builds plan reports from a ledger and a budget store.
#[derive(Debug, Clone)]
pub struct AnalyticsService<L, B> {
    ledger: L,
    budgets: B,
}

impl<L, B> AnalyticsService<L, B>
where
    L: LedgerSource,
    B: BudgetSource,
{
    /// Creates a new analytics service.
    pub const fn new(ledger: L, budgets: B) -> Self {
        Self { ledger, budgets }
    }

    /// Builds the report for an account's plan in `period`.
    ///
    /// The current and previous period are loaded concurrently.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFound` when the account has no plan for
    /// the period, or `AnalyticsError::Source` when loading fails.
    pub async fn report(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<PlanReport, AnalyticsError> {
        let plan = self
            .budgets
            .get_plan(account_id, period)
            .await
            .map_err(AnalyticsError::Source)?
            .ok_or(AnalyticsError::NotFound(period))?;

        let (current, previous) = tokio::try_join!(
            self.ledger.list_entries(account_id, period),
            self.ledger.list_entries(account_id, period.previous()),
        )
        .map_err(AnalyticsError::Source)?;

        let analytics = AnalyticsEngine::compute_report(&plan, &current, &previous);

        Ok(PlanReport { plan, analytics })
    }

    /// Same as [`report`](Self::report) but takes a raw month and year.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidPeriod` for out-of-range values.
    pub async fn report_for(
        &self,
        account_id: AccountId,
        month: u32,
        year: i32,
    ) -> Result<PlanReport, AnalyticsError> {
        let period = Period::new(month, year)?;
        self.report(account_id, period).await
    }
}
