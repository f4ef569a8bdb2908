//! Resolution of interpreted commands into ledger input.

use numo_shared::types::Cents;

use super::error::NumoChatError;
use super::types::{CommandContext, InterpretedCommand, ResolvedEntry};
use crate::ledger::{EntryKind, LedgerValidator, Metadata, NewExpense, NewRevenue};

/// NumoChat business logic.
pub struct NumoChatService;

impl NumoChatService {
    /// Trims the command and rejects blank input.
    ///
    /// # Errors
    ///
    /// Returns `NumoChatError::EmptyCommand` for blank commands.
    pub fn validate_command(command: &str) -> Result<&str, NumoChatError> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(NumoChatError::EmptyCommand);
        }
        Ok(trimmed)
    }

    /// Turns an interpreted command into a validated ledger input.
    ///
    /// References to categories or payment options not present in `context`
    /// are dropped. Revenues never carry a category.
    ///
    /// # Errors
    ///
    /// Returns `NumoChatError::InvalidEntry` when the extracted fields fail
    /// the same validation as manual entry.
    pub fn resolve(
        command: InterpretedCommand,
        context: &CommandContext,
    ) -> Result<ResolvedEntry, NumoChatError> {
        let payment_option_id = command.payment_option_id.as_deref().and_then(|raw| {
            context
                .payment_options
                .iter()
                .find(|o| o.id.to_string() == raw.trim())
                .map(|o| o.id)
        });

        match command.kind {
            EntryKind::Revenue => {
                let revenue = NewRevenue {
                    month: command.month,
                    year: command.year,
                    day: command.day,
                    amount: command.amount,
                    description: command.description.trim().to_string(),
                    payment_option_id,
                };
                LedgerValidator::validate_revenue(&revenue)?;
                Ok(ResolvedEntry::Revenue(revenue))
            }
            EntryKind::Expense => {
                let category_id = command.category_id.as_deref().and_then(|raw| {
                    context
                        .categories
                        .iter()
                        .find(|o| o.id.to_string() == raw.trim())
                        .map(|o| o.id)
                });
                let expense = NewExpense {
                    month: command.month,
                    year: command.year,
                    day: command.day,
                    amount: command.amount,
                    description: command.description.trim().to_string(),
                    category_id,
                    payment_option_id,
                    fixed: command.fixed,
                    metadata: Metadata::new(),
                };
                LedgerValidator::validate_expense(&expense)?;
                Ok(ResolvedEntry::Expense(expense))
            }
        }
    }

    /// Human-readable confirmation for a created entry.
    #[must_use]
    pub fn summary(entry: &ResolvedEntry) -> String {
        let (label, description, amount, month, year) = match entry {
            ResolvedEntry::Revenue(r) => ("Revenue", &r.description, r.amount, r.month, r.year),
            ResolvedEntry::Expense(e) => ("Expense", &e.description, e.amount, e.month, e.year),
        };
        format!(
            "{label} \"{description}\" of {} recorded for {month:02}/{year}",
            format_cents(amount)
        )
    }
}

fn format_cents(amount: Cents) -> String {
    let value = amount.value();
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
