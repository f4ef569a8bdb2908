//! Budget plan ("abstract") routes and the analytics report.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::extract::Path;
use crate::{AppState, middleware::AuthUser};
use numo_core::analytics::{AnalyticsService, PlanReport};
use numo_core::budget::{BudgetPlan, CreateBudgetPlanInput, Notes};
use numo_db::{BudgetRepository, LedgerStore};
use numo_shared::types::AbstractId;

/// Creates the abstract routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/abstracts", get(list_abstracts).post(create_abstract))
        .route("/abstracts/{month}/{year}", get(get_abstract))
        .route("/abstracts/id/{abstract_id}/notes", put(update_notes))
}

/// Request body for replacing a plan's notes.
#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    /// New notes; replaces the existing map.
    pub notes: Notes,
}

/// POST /abstracts - Create a budget plan.
async fn create_abstract(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetPlanInput>,
) -> ApiResult<impl IntoResponse> {
    let plan = BudgetRepository::new((*state.db).clone())
        .create(auth.account_id(), &payload)
        .await?;

    info!(account_id = %auth.account_id(), abstract_id = %plan.id, "Budget plan created");

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /abstracts - List the account's plans.
async fn list_abstracts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<BudgetPlan>>> {
    let plans = BudgetRepository::new((*state.db).clone())
        .list(auth.account_id())
        .await?;
    Ok(Json(plans))
}

/// GET `/abstracts/{month}/{year}` - Plan with its analytics report.
async fn get_abstract(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((month, year)): Path<(u32, i32)>,
) -> ApiResult<Json<PlanReport>> {
    let service = AnalyticsService::new(
        LedgerStore::new((*state.db).clone()),
        BudgetRepository::new((*state.db).clone()),
    );
    let report = service.report_for(auth.account_id(), month, year).await?;
    Ok(Json(report))
}

/// PUT `/abstracts/id/{abstract_id}/notes` - Replace a plan's notes.
async fn update_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(abstract_id): Path<AbstractId>,
    Json(payload): Json<UpdateNotesRequest>,
) -> ApiResult<Json<BudgetPlan>> {
    let plan = BudgetRepository::new((*state.db).clone())
        .update_notes(auth.account_id(), abstract_id, &payload.notes)
        .await?;
    Ok(Json(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_support::{FakeInterpreter, login_as, protected, send, test_state};
    use numo_core::ledger::{Metadata, NewExpense, NewRevenue};
    use numo_db::{CategoryRepository, ExpenseRepository, RevenueRepository};
    use numo_shared::types::{AccountId, CategoryId, Cents};

    async fn seed_june(state: &AppState, account: AccountId) {
        let db = (*state.db).clone();
        let food = CategoryRepository::new(db.clone())
            .create(account, "Food")
            .await
            .unwrap();
        let food_id = CategoryId::from_uuid(food.id);

        BudgetRepository::new(db.clone())
            .create(
                account,
                &serde_json::from_value::<CreateBudgetPlanInput>(json!({
                    "name": "June",
                    "month": 6,
                    "year": 2024,
                    "planned_revenue": 500_000,
                    "planned_expenses": [{"category_id": food_id, "planned": 200_000}]
                }))
                .unwrap(),
            )
            .await
            .unwrap();

        let revenues = RevenueRepository::new(db.clone());
        let expenses = ExpenseRepository::new(db);
        for (month, revenue, expense) in [(6, 550_000, 210_000), (5, 500_000, 250_000)] {
            revenues
                .create(
                    account,
                    &NewRevenue {
                        month,
                        year: 2024,
                        day: 5,
                        amount: Cents::new(revenue),
                        description: "Salary".into(),
                        payment_option_id: None,
                    },
                )
                .await
                .unwrap();
            expenses
                .create(
                    account,
                    &NewExpense {
                        month,
                        year: 2024,
                        day: 12,
                        amount: Cents::new(expense),
                        description: "Groceries".into(),
                        category_id: Some(food_id),
                        payment_option_id: None,
                        fixed: false,
                        metadata: Metadata::new(),
                    },
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_report_requires_auth() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let app = protected(routes(), &state);

        let (status, body) = send(app, "GET", "/abstracts/6/2024", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_report_rejects_invalid_month() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (status, body) = send(app, "GET", "/abstracts/13/2024", Some(&token), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_report_rejects_malformed_path_as_json() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        for uri in ["/abstracts/abc/2024", "/abstracts/-1/2024", "/abstracts/6/year"] {
            let (status, body) = send(app.clone(), "GET", uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "validation_error", "{uri}");
            assert!(body["message"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_plan() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (status, body) = send(
            app,
            "POST",
            "/abstracts",
            Some(&token),
            Some(json!({
                "name": "Huge",
                "month": 6,
                "year": 2024,
                "planned_revenue": i64::MAX,
                "planned_expenses": []
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_report_without_plan_is_not_found() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (status, body) = send(app, "GET", "/abstracts/6/2024", Some(&token), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_report_for_june() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (account, token) = login_as(&state).await;
        seed_june(&state, account).await;
        let app = protected(routes(), &state);

        let (status, body) = send(app, "GET", "/abstracts/6/2024", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["abstract"]["name"], "June");
        let analytics = &body["analytics"];
        assert_eq!(analytics["actual"]["balance"], 340_000);
        assert_eq!(analytics["variance"]["revenue"], 50_000);
        assert_eq!(analytics["variance"]["expenses"], 10_000);
        assert_eq!(analytics["trends"]["revenue"], "up");
        assert_eq!(analytics["trends"]["expenses"], "down");
        assert_eq!(analytics["projections"]["revenue"], 1_100_000);
        assert_eq!(analytics["projections"]["expenses"], 420_000);
    }

    #[tokio::test]
    async fn test_duplicate_plan_is_conflict() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);
        let payload = json!({"name": "June", "month": 6, "year": 2024, "planned_revenue": 100});

        let (status, _) = send(app.clone(), "POST", "/abstracts", Some(&token), Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app.clone(), "POST", "/abstracts", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");

        let (status, body) = send(app, "GET", "/abstracts", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_notes() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (_, plan) = send(
            app.clone(),
            "POST",
            "/abstracts",
            Some(&token),
            Some(json!({"name": "June", "month": 6, "year": 2024, "planned_revenue": 100})),
        )
        .await;
        let uri = format!("/abstracts/id/{}/notes", plan["id"].as_str().unwrap());

        let (status, body) = send(
            app.clone(),
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"notes": {"goal": "emergency fund"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notes"]["goal"], "emergency fund");

        let (_, stranger_token) = login_as(&state).await;
        let (status, _) = send(
            app,
            "PUT",
            &uri,
            Some(&stranger_token),
            Some(json!({"notes": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
