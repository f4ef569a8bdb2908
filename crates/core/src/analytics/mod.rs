//! Budget analytics: actual vs planned, variance, trends and projections.
//!
//! [`AnalyticsEngine`] is a pure function over already-loaded data.
//! [`AnalyticsService`] loads that data through the [`LedgerSource`] and
//! [`BudgetSource`] seams and owns the missing-plan failure.

pub mod engine;
pub mod error;
pub mod service;
pub mod source;
pub mod types;


pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use service::AnalyticsService;
pub use source::{BudgetSource, LedgerSource, SourceError};
pub use types::{
    ActualTotals, AnalyticsReport, PeriodEntries, PeriodEntry, PlanReport, PlannedTotals,
    Projections, Trend, Trends, Variance,
};
