//! Expense routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::PeriodQuery;
use crate::error::{ApiError, ApiResult};
use crate::extract::{Path, Query};
use crate::{AppState, middleware::AuthUser};
use numo_core::ledger::{EntryStatus, ExpensePatch, Metadata, NewExpense};
use numo_db::repositories::{ExpenseFilter, ExpenseWithRefs};
use numo_db::ExpenseRepository;
use numo_shared::AppError;
use numo_shared::types::{CategoryId, Cents, ExpenseId};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/category/{category_id}", get(list_by_category))
        .route(
            "/expenses/{expense_id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Query parameters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Budget month (with `year`).
    pub month: Option<u32>,
    /// Budget year (with `month`).
    pub year: Option<i32>,
    /// Only this category.
    pub category_id: Option<CategoryId>,
}

/// Response for an expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Budget month.
    pub month: i32,
    /// Budget year.
    pub year: i32,
    /// Day of month.
    pub day: i32,
    /// Amount in cents.
    pub amount: Cents,
    /// Description.
    pub description: String,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Category name.
    pub category_name: Option<String>,
    /// Payment option.
    pub payment_option_id: Option<Uuid>,
    /// Payment option name.
    pub payment_option_name: Option<String>,
    /// Recurring expense flag.
    pub fixed: bool,
    /// Extra attributes.
    pub metadata: Metadata,
    /// Soft-delete status.
    pub status: EntryStatus,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseWithRefs> for ExpenseResponse {
    fn from(row: ExpenseWithRefs) -> Self {
        let e = row.expense;
        Self {
            id: e.id,
            month: e.month,
            year: e.year,
            day: e.day,
            amount: Cents::new(e.amount),
            description: e.description,
            category_id: e.category_id,
            category_name: row.category_name,
            payment_option_id: e.payment_option_id,
            payment_option_name: row.payment_option_name,
            fixed: e.fixed,
            metadata: row.metadata,
            status: EntryStatus::from_tombstone(e.deleted_at.as_ref()),
            created_at: e.created_at.to_utc(),
            updated_at: e.updated_at.to_utc(),
        }
    }
}

fn to_responses(rows: Vec<ExpenseWithRefs>) -> Json<Vec<ExpenseResponse>> {
    Json(rows.into_iter().map(ExpenseResponse::from).collect())
}

/// POST /expenses - Record an expense.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewExpense>,
) -> ApiResult<impl IntoResponse> {
    let expense = ExpenseRepository::new((*state.db).clone())
        .create(auth.account_id(), &payload)
        .await?;

    info!(account_id = %auth.account_id(), expense_id = %expense.expense.id, "Expense created");

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

/// GET /expenses - List live expenses.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListExpensesQuery>,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let period = PeriodQuery {
        month: query.month,
        year: query.year,
    }
    .period()?;

    let rows = ExpenseRepository::new((*state.db).clone())
        .list(
            auth.account_id(),
            ExpenseFilter {
                period,
                category_id: query.category_id,
            },
        )
        .await?;
    Ok(to_responses(rows))
}

/// GET `/expenses/category/{category_id}` - List live expenses of one category.
async fn list_by_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<CategoryId>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let rows = ExpenseRepository::new((*state.db).clone())
        .list(
            auth.account_id(),
            ExpenseFilter {
                period: query.period()?,
                category_id: Some(category_id),
            },
        )
        .await?;
    Ok(to_responses(rows))
}

/// GET `/expenses/{expense_id}` - Get one expense.
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
) -> ApiResult<Json<ExpenseResponse>> {
    ExpenseRepository::new((*state.db).clone())
        .find(auth.account_id(), expense_id)
        .await?
        .map(|e| Json(ExpenseResponse::from(e)))
        .ok_or_else(|| ApiError(AppError::NotFound(format!("Expense not found: {expense_id}"))))
}

/// PUT `/expenses/{expense_id}` - Partially update an expense.
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
    Json(payload): Json<ExpensePatch>,
) -> ApiResult<Json<ExpenseResponse>> {
    let expense = ExpenseRepository::new((*state.db).clone())
        .update(auth.account_id(), expense_id, &payload)
        .await?;
    Ok(Json(ExpenseResponse::from(expense)))
}

/// DELETE `/expenses/{expense_id}` - Soft-delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<ExpenseId>,
) -> ApiResult<StatusCode> {
    ExpenseRepository::new((*state.db).clone())
        .delete(auth.account_id(), expense_id)
        .await?;

    info!(account_id = %auth.account_id(), expense_id = %expense_id, "Expense deleted");

    Ok(StatusCode::NO_CONTENT)
}
