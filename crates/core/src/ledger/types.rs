//! Ledger domain types.

use std::collections::BTreeMap;

use numo_shared::types::{CategoryId, Cents, PaymentOptionId};
use serde::{Deserialize, Serialize};

/// Free-form string attributes attached to an expense.
pub type Metadata = BTreeMap<String, String>;

/// Which side of the ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in.
    Revenue,
    /// Money going out.
    Expense,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Soft-delete status of a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Visible to listings and analytics.
    Active,
    /// Tombstoned.
    Deleted,
}

impl EntryStatus {
    /// Derives the status from a `deleted_at` tombstone.
    #[must_use]
    pub const fn from_tombstone<T>(deleted_at: Option<&T>) -> Self {
        match deleted_at {
            Some(_) => Self::Deleted,
            None => Self::Active,
        }
    }

    /// Returns true for live rows.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Input for creating a revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRevenue {
    /// Budget month (1-12).
    pub month: u32,
    /// Budget year.
    pub year: i32,
    /// Day of month (1-31).
    pub day: u32,
    /// Amount in cents.
    pub amount: Cents,
    /// Description.
    pub description: String,
    /// Optional payment option.
    #[serde(default)]
    pub payment_option_id: Option<PaymentOptionId>,
}

/// Input for creating an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Budget month (1-12).
    pub month: u32,
    /// Budget year.
    pub year: i32,
    /// Day of month (1-31).
    pub day: u32,
    /// Amount in cents.
    pub amount: Cents,
    /// Description.
    pub description: String,
    /// Optional category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Optional payment option.
    #[serde(default)]
    pub payment_option_id: Option<PaymentOptionId>,
    /// Recurring expense flag.
    #[serde(default)]
    pub fixed: bool,
    /// Extra attributes.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Partial update for a revenue. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RevenuePatch {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub day: Option<u32>,
    pub amount: Option<Cents>,
    pub description: Option<String>,
    /// `Some(None)` clears the payment option.
    #[serde(default, deserialize_with = "double_option")]
    pub payment_option_id: Option<Option<PaymentOptionId>>,
}

/// Partial update for an expense. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExpensePatch {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub day: Option<u32>,
    pub amount: Option<Cents>,
    pub description: Option<String>,
    /// `Some(None)` clears the category.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<CategoryId>>,
    /// `Some(None)` clears the payment option.
    #[serde(default, deserialize_with = "double_option")]
    pub payment_option_id: Option<Option<PaymentOptionId>>,
    pub fixed: Option<bool>,
    pub metadata: Option<Metadata>,
}

// Distinguishes an explicit `null` from a missing field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_tombstone() {
        assert_eq!(
            EntryStatus::from_tombstone::<chrono::DateTime<chrono::Utc>>(None),
            EntryStatus::Active
        );
        assert_eq!(
            EntryStatus::from_tombstone(Some(&chrono::Utc::now())),
            EntryStatus::Deleted
        );
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing() {
        let patch: ExpensePatch = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(patch.category_id, Some(None));
        assert_eq!(patch.payment_option_id, None);
    }

    #[test]
    fn test_new_expense_defaults() {
        let expense: NewExpense = serde_json::from_str(
            r#"{"month":3,"year":2024,"day":5,"amount":1250,"description":"Lunch"}"#,
        )
        .unwrap();
        assert!(!expense.fixed);
        assert!(expense.metadata.is_empty());
        assert_eq!(expense.amount, Cents::new(1250));
    }
}
