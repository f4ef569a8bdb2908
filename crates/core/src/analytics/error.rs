//! Analytics error types.

use numo_shared::types::{Period, PeriodError};
use thiserror::Error;

use super::source::SourceError;

/// Errors raised while building an analytics report.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No budget plan exists for the requested period.
    #[error("No budget plan found for {0}")]
    NotFound(Period),

    /// Month or year out of range.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// A data source failed.
    #[error("Failed to load analytics data: {0}")]
    Source(SourceError),
}
