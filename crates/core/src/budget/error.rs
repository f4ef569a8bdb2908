//! Budget error types.

use numo_shared::types::{AbstractId, CategoryId, Cents, Period, PeriodError};
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget plan not found.
    #[error("Budget plan not found: {0}")]
    NotFound(AbstractId),

    /// A plan already exists for this period.
    #[error("A budget plan already exists for {0}")]
    DuplicatePeriod(Period),

    /// Month or year out of range.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// Plan name is required.
    #[error("Budget plan name cannot be empty")]
    EmptyName,

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Amount above the accepted maximum.
    #[error("Amount cannot exceed {max} cents", max = Cents::MAX_AMOUNT)]
    AmountTooLarge,

    /// The same category is planned twice.
    #[error("Category planned more than once: {0}")]
    DuplicateCategory(CategoryId),

    /// Category does not exist for this account.
    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// Note keys must be non-empty.
    #[error("Note keys cannot be empty")]
    EmptyNoteKey,
}
