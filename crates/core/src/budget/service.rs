//! Budget plan validation.

use std::collections::HashSet;

use numo_shared::types::{CategoryId, Cents, Period};

use super::error::BudgetError;
use super::types::{CreateBudgetPlanInput, Notes};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Validates a plan before it is stored and returns its period.
    ///
    /// `known_categories` holds the live categories owned by the account.
    ///
    /// # Errors
    ///
    /// Returns the first `BudgetError` found.
    pub fn validate_create(
        input: &CreateBudgetPlanInput,
        known_categories: &HashSet<CategoryId>,
    ) -> Result<Period, BudgetError> {
        if input.name.trim().is_empty() {
            return Err(BudgetError::EmptyName);
        }

        let period = Period::new(input.month, input.year)?;

        Self::validate_amount(input.planned_revenue)?;

        let mut seen = HashSet::with_capacity(input.planned_expenses.len());
        for line in &input.planned_expenses {
            Self::validate_amount(line.planned)?;
            if !seen.insert(line.category_id) {
                return Err(BudgetError::DuplicateCategory(line.category_id));
            }
            if !known_categories.contains(&line.category_id) {
                return Err(BudgetError::UnknownCategory(line.category_id));
            }
        }

        Self::validate_notes(&input.notes)?;

        Ok(period)
    }

    fn validate_amount(amount: Cents) -> Result<(), BudgetError> {
        if amount.is_negative() {
            return Err(BudgetError::NegativeAmount);
        }
        if amount.exceeds_max() {
            return Err(BudgetError::AmountTooLarge);
        }
        Ok(())
    }

    /// Validates plan notes.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyNoteKey` if any key is blank.
    pub fn validate_notes(notes: &Notes) -> Result<(), BudgetError> {
        if notes.keys().any(|k| k.trim().is_empty()) {
            return Err(BudgetError::EmptyNoteKey);
        }
        Ok(())
    }
}
