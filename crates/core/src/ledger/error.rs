//! Ledger error types.

use numo_shared::types::{Cents, PeriodError};
use thiserror::Error;

/// Errors raised while validating ledger input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Month or year out of range.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// Day of month out of range.
    #[error("day must be between 1 and 31, got {0}")]
    InvalidDay(u32),

    /// Amount cannot be negative.
    #[error("amount cannot be negative")]
    NegativeAmount,

    /// Amount above the accepted maximum.
    #[error("amount cannot exceed {max} cents", max = Cents::MAX_AMOUNT)]
    AmountTooLarge,

    /// Description is required.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// Category or payment option name is required.
    #[error("name cannot be empty")]
    EmptyName,

    /// Metadata keys must be non-empty.
    #[error("metadata keys cannot be empty")]
    EmptyMetadataKey,
}
