//! Unit tests for plan row decoding.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use numo_shared::types::Cents;

use super::budget::{BudgetRepoError, to_plan};
use crate::entities::{abstract_expense_plans, abstracts};

fn model(month: i32, notes: serde_json::Value) -> abstracts::Model {
    let now = Utc::now().into();
    abstracts::Model {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        name: "June".to_string(),
        month,
        year: 2024,
        planned_revenue: 500_000,
        notes,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_to_plan_decodes_lines_and_notes() {
    let m = model(6, json!({"goal": "save"}));
    let line = abstract_expense_plans::Model {
        id: Uuid::new_v4(),
        abstract_id: m.id,
        category_id: Uuid::new_v4(),
        planned: 200_000,
    };

    let plan = to_plan(m, vec![line]).unwrap();

    assert_eq!(plan.period.month(), 6);
    assert_eq!(plan.planned_revenue, Cents::new(500_000));
    assert_eq!(plan.planned_expenses_total(), Cents::new(200_000));
    assert_eq!(plan.notes.get("goal").map(String::as_str), Some("save"));
}

#[test]
fn test_to_plan_rejects_bad_month() {
    let result = to_plan(model(13, json!({})), vec![]);
    assert!(matches!(result, Err(BudgetRepoError::Corrupt(_))));
}

#[test]
fn test_to_plan_rejects_non_string_notes() {
    let result = to_plan(model(6, json!({"goal": 5})), vec![]);
    assert!(matches!(result, Err(BudgetRepoError::Corrupt(_))));
}
