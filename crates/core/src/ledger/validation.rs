//! Field validation for ledger input.

use numo_shared::types::{Cents, Period};

use super::error::LedgerError;
use super::types::{ExpensePatch, Metadata, NewExpense, NewRevenue, RevenuePatch};

/// Stateless validator for revenues, expenses and their catalog names.
pub struct LedgerValidator;

impl LedgerValidator {
    /// Validates a new revenue and returns its period.
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found.
    pub fn validate_revenue(input: &NewRevenue) -> Result<Period, LedgerError> {
        let period = Period::new(input.month, input.year)?;
        Self::validate_day(input.day)?;
        Self::validate_amount(input.amount)?;
        Self::validate_description(&input.description)?;
        Ok(period)
    }

    /// Validates a new expense and returns its period.
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found.
    pub fn validate_expense(input: &NewExpense) -> Result<Period, LedgerError> {
        let period = Period::new(input.month, input.year)?;
        Self::validate_day(input.day)?;
        Self::validate_amount(input.amount)?;
        Self::validate_description(&input.description)?;
        Self::validate_metadata(&input.metadata)?;
        Ok(period)
    }

    /// Validates the fields present in a revenue patch.
    ///
    /// Month and year are checked against the stored values they will be
    /// combined with.
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found.
    pub fn validate_revenue_patch(
        patch: &RevenuePatch,
        current: Period,
    ) -> Result<Period, LedgerError> {
        let period = Period::new(
            patch.month.unwrap_or(current.month()),
            patch.year.unwrap_or(current.year()),
        )?;
        if let Some(day) = patch.day {
            Self::validate_day(day)?;
        }
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        if let Some(description) = &patch.description {
            Self::validate_description(description)?;
        }
        Ok(period)
    }

    /// Validates the fields present in an expense patch.
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` found.
    pub fn validate_expense_patch(
        patch: &ExpensePatch,
        current: Period,
    ) -> Result<Period, LedgerError> {
        let period = Period::new(
            patch.month.unwrap_or(current.month()),
            patch.year.unwrap_or(current.year()),
        )?;
        if let Some(day) = patch.day {
            Self::validate_day(day)?;
        }
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        if let Some(description) = &patch.description {
            Self::validate_description(description)?;
        }
        if let Some(metadata) = &patch.metadata {
            Self::validate_metadata(metadata)?;
        }
        Ok(period)
    }

    /// Validates a category or payment option name.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EmptyName` for blank names.
    pub fn validate_name(name: &str) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        Ok(())
    }

    fn validate_day(day: u32) -> Result<(), LedgerError> {
        if (1..=31).contains(&day) {
            Ok(())
        } else {
            Err(LedgerError::InvalidDay(day))
        }
    }

    fn validate_amount(amount: Cents) -> Result<(), LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount);
        }
        if amount.exceeds_max() {
            return Err(LedgerError::AmountTooLarge);
        }
        Ok(())
    }

    fn validate_description(description: &str) -> Result<(), LedgerError> {
        if description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        Ok(())
    }

    fn validate_metadata(metadata: &Metadata) -> Result<(), LedgerError> {
        if metadata.keys().any(|k| k.trim().is_empty()) {
            return Err(LedgerError::EmptyMetadataKey);
        }
        Ok(())
    }
}
