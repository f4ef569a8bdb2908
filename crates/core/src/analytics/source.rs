//! Data-loading seams for the analytics service.

use async_trait::async_trait;
use numo_shared::types::{AccountId, Period};

use super::types::PeriodEntries;
use crate::budget::BudgetPlan;

/// Error type returned by data sources.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Loads ledger entries for one account and period.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Returns every entry for the period. Tombstoned entries may be
    /// included; the engine filters them by status.
    async fn list_entries(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<PeriodEntries, SourceError>;
}

/// Loads budget plans.
#[async_trait]
pub trait BudgetSource: Send + Sync {
    /// Returns the account's plan for the period, if any.
    async fn get_plan(
        &self,
        account_id: AccountId,
        period: Period,
    ) -> Result<Option<BudgetPlan>, SourceError>;
}
