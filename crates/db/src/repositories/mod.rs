//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query is scoped to the owning account.

pub mod account;
pub mod budget;
pub mod category;
pub mod expense;
pub mod ledger;
pub mod payment_option;
pub mod revenue;

#[cfg(test)]
mod budget_tests;

pub use account::{AccountError, AccountRepository};
pub use budget::{BudgetRepoError, BudgetRepository};
pub use category::{CatalogError, CategoryRepository};
pub use expense::{ExpenseFilter, ExpenseRepository, ExpenseWithRefs};
pub use ledger::{LedgerRepoError, LedgerStore, TransactionItem};
pub use payment_option::PaymentOptionRepository;
pub use revenue::RevenueRepository;

/// Converts a validated unsigned calendar field to its column type.
pub(crate) fn to_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Converts a stored calendar column back to its domain type.
pub(crate) fn from_column(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
