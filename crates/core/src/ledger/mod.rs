//! Revenue and expense ledger rules.
//!
//! This module implements:
//! - Entry kinds and soft-delete status
//! - Input types for creating and patching revenues and expenses
//! - Field validation shared by manual entry and NumoChat

pub mod error;
pub mod types;
pub mod validation;

pub use error::LedgerError;
pub use types::{
    EntryKind, EntryStatus, ExpensePatch, Metadata, NewExpense, NewRevenue, RevenuePatch,
};
pub use validation::LedgerValidator;
