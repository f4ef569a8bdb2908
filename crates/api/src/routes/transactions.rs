//! Recent transactions feed.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::error::ApiResult;
use crate::extract::Query;
use crate::{AppState, middleware::AuthUser};
use numo_db::LedgerStore;
use numo_db::repositories::TransactionItem;
use numo_shared::types::{PageRequest, PageResponse};

/// Creates the transaction feed routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/transactions", get(list_transactions))
}

/// GET /transactions - Live revenues and expenses, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<TransactionItem>>> {
    page.validate()?;

    let feed = LedgerStore::new((*state.db).clone())
        .recent_transactions(auth.account_id(), page)
        .await?;
    Ok(Json(feed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{FakeInterpreter, login_as, protected, send, test_state};

    #[tokio::test]
    async fn test_feed_merges_revenues_and_expenses() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(
            routes()
                .merge(crate::routes::revenues::routes())
                .merge(crate::routes::expenses::routes()),
            &state,
        );

        send(
            app.clone(),
            "POST",
            "/revenues",
            Some(&token),
            Some(json!({"month": 6, "year": 2024, "day": 1, "amount": 1000, "description": "Salary"})),
        )
        .await;
        send(
            app.clone(),
            "POST",
            "/expenses",
            Some(&token),
            Some(json!({"month": 6, "year": 2024, "day": 2, "amount": 500, "description": "Lunch"})),
        )
        .await;

        let (status, body) = send(app.clone(), "GET", "/transactions?limit=1", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["has_more"], true);

        let (_, body) = send(app.clone(), "GET", "/transactions", Some(&token), None).await;
        let kinds: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["type"].as_str().unwrap())
            .collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&"revenue") && kinds.contains(&"expense"));
        assert_eq!(body["pagination"]["has_more"], false);
    }

    #[tokio::test]
    async fn test_feed_rejects_bad_paging() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (status, _) = send(app.clone(), "GET", "/transactions?page=0", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(app, "GET", "/transactions?limit=101", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
