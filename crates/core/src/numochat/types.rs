//! NumoChat types and the interpreter seam.

use async_trait::async_trait;
use chrono::NaiveDate;
use numo_shared::types::{CategoryId, Cents, PaymentOptionId};
use serde::{Deserialize, Serialize};

use super::error::NumoChatError;
use crate::ledger::{EntryKind, NewExpense, NewRevenue};

/// A selectable option shown to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedOption<Id> {
    /// Option ID.
    pub id: Id,
    /// Display name.
    pub name: String,
}

/// What the interpreter may reference, plus today's date.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Live expense categories of the account.
    pub categories: Vec<NamedOption<CategoryId>>,
    /// Live payment options of the account.
    pub payment_options: Vec<NamedOption<PaymentOptionId>>,
    /// Date used for relative expressions like "yesterday".
    pub today: NaiveDate,
}

/// Structured entry extracted from a command.
///
/// Option ids are kept as raw strings; unknown or malformed ids are dropped
/// during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpretedCommand {
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Short description.
    pub description: String,
    /// Amount in cents.
    pub amount: Cents,
    /// Suggested category.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Suggested payment option.
    #[serde(default)]
    pub payment_option_id: Option<String>,
    /// Budget month.
    pub month: u32,
    /// Budget year.
    pub year: i32,
    /// Day of month.
    #[serde(alias = "date")]
    pub day: u32,
    /// Recurring expense flag.
    #[serde(default)]
    pub fixed: bool,
}

/// A validated ledger input ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEntry {
    /// A revenue to create.
    Revenue(NewRevenue),
    /// An expense to create.
    Expense(NewExpense),
}

impl ResolvedEntry {
    /// Entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Revenue(_) => EntryKind::Revenue,
            Self::Expense(_) => EntryKind::Expense,
        }
    }
}

/// Extracts a structured entry from free text.
#[async_trait]
pub trait CommandInterpreter: Send + Sync {
    /// Interprets `command` against the account's options.
    async fn interpret(
        &self,
        command: &str,
        context: &CommandContext,
    ) -> Result<InterpretedCommand, NumoChatError>;
}
