//! Integration tests for budget plans.

mod common;

use std::collections::BTreeMap;

use numo_core::budget::{BudgetError, CreateBudgetPlanInput, PlannedExpense};
use numo_db::repositories::BudgetRepoError;
use numo_db::{BudgetRepository, CategoryRepository};
use numo_shared::types::{AbstractId, CategoryId, Cents, Period};

fn june_plan(planned_expenses: Vec<PlannedExpense>) -> CreateBudgetPlanInput {
    CreateBudgetPlanInput {
        name: "June".to_string(),
        month: 6,
        year: 2024,
        planned_revenue: Cents::new(500_000),
        planned_expenses,
        notes: BTreeMap::new(),
    }
}

#[tokio::test]
async fn test_create_and_find_plan() {
    let db = common::setup_db().await;
    let account = common::create_account(&db).await;
    let food = CategoryRepository::new(db.clone())
        .create(account, "Food")
        .await
        .unwrap();
    let food_id = CategoryId::from_uuid(food.id);
    let repo = BudgetRepository::new(db.clone());

    let created = repo
        .create(
            account,
            &june_plan(vec![PlannedExpense {
                category_id: food_id,
                planned: Cents::new(300_000),
            }]),
        )
        .await
        .expect("Failed to create plan");

    assert_eq!(created.period, Period::new(6, 2024).unwrap());
    assert_eq!(created.planned_expenses_total(), Cents::new(300_000));

    let found = repo
        .find_by_period(account, Period::new(6, 2024).unwrap())
        .await
        .unwrap()
        .expect("Plan should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.planned_expenses.len(), 1);
    assert_eq!(found.planned_expenses[0].category_id, food_id);
}

#[tokio::test]
async fn test_duplicate_period_is_rejected() {
    let db = common::setup_db().await;
    let account = common::create_account(&db).await;
    let repo = BudgetRepository::new(db.clone());

    repo.create(account, &june_plan(vec![])).await.unwrap();
    let second = repo.create(account, &june_plan(vec![])).await;

    assert!(matches!(
        second,
        Err(BudgetRepoError::Budget(BudgetError::DuplicatePeriod(_)))
    ));
}

#[tokio::test]
async fn test_same_period_for_different_accounts() {
    let db = common::setup_db().await;
    let first = common::create_account(&db).await;
    let second = common::create_account(&db).await;
    let repo = BudgetRepository::new(db.clone());

    repo.create(first, &june_plan(vec![])).await.unwrap();
    repo.create(second, &june_plan(vec![])).await.unwrap();

    assert_eq!(repo.list(first).await.unwrap().len(), 1);
    assert_eq!(repo.list(second).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_foreign_category_is_rejected() {
    let db = common::setup_db().await;
    let owner = common::create_account(&db).await;
    let stranger = common::create_account(&db).await;
    let food = CategoryRepository::new(db.clone())
        .create(owner, "Food")
        .await
        .unwrap();

    let result = BudgetRepository::new(db.clone())
        .create(
            stranger,
            &june_plan(vec![PlannedExpense {
                category_id: CategoryId::from_uuid(food.id),
                planned: Cents::new(100),
            }]),
        )
        .await;

    assert!(matches!(
        result,
        Err(BudgetRepoError::Budget(BudgetError::UnknownCategory(_)))
    ));
}

#[tokio::test]
async fn test_list_orders_by_year_then_month() {
    let db = common::setup_db().await;
    let account = common::create_account(&db).await;
    let repo = BudgetRepository::new(db.clone());

    for (month, year) in [(3, 2025), (11, 2024), (1, 2025)] {
        let mut input = june_plan(vec![]);
        input.month = month;
        input.year = year;
        repo.create(account, &input).await.unwrap();
    }

    let periods: Vec<String> = repo
        .list(account)
        .await
        .unwrap()
        .iter()
        .map(|p| p.period.to_string())
        .collect();
    assert_eq!(periods, vec!["2024-11", "2025-01", "2025-03"]);
}

#[tokio::test]
async fn test_update_notes() {
    let db = common::setup_db().await;
    let owner = common::create_account(&db).await;
    let stranger = common::create_account(&db).await;
    let repo = BudgetRepository::new(db.clone());
    let plan = repo.create(owner, &june_plan(vec![])).await.unwrap();

    let mut notes = BTreeMap::new();
    notes.insert("goal".to_string(), "save for holidays".to_string());

    let updated = repo.update_notes(owner, plan.id, &notes).await.unwrap();
    assert_eq!(updated.notes.get("goal").map(String::as_str), Some("save for holidays"));

    assert!(matches!(
        repo.update_notes(stranger, plan.id, &notes).await,
        Err(BudgetRepoError::Budget(BudgetError::NotFound(_)))
    ));
    assert!(matches!(
        repo.update_notes(owner, AbstractId::new(), &notes).await,
        Err(BudgetRepoError::Budget(BudgetError::NotFound(_)))
    ));
}
