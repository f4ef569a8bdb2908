//! NumoChat: record a revenue or expense from a natural-language command.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::expenses::ExpenseResponse;
use super::revenues::RevenueResponse;
use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};
use numo_core::numochat::{CommandContext, NumoChatError, NumoChatService, ResolvedEntry};
use numo_db::{CategoryRepository, ExpenseRepository, PaymentOptionRepository, RevenueRepository};

/// Creates the NumoChat routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/numochat", post(numochat))
}

/// Request body for a NumoChat command.
#[derive(Debug, Deserialize)]
pub struct NumoChatRequest {
    /// Free-text command, e.g. "spent 25.50 on lunch yesterday with card".
    pub command: String,
}

fn rejected(err: &NumoChatError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// POST /numochat - Interpret a command and record the entry.
async fn numochat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NumoChatRequest>,
) -> ApiResult<Response> {
    let account_id = auth.account_id();

    let command = match NumoChatService::validate_command(&payload.command) {
        Ok(command) => command,
        Err(e) => return Ok(rejected(&e)),
    };

    let categories = CategoryRepository::new((*state.db).clone());
    let payment_options = PaymentOptionRepository::new((*state.db).clone());
    let (categories, payment_options) = tokio::try_join!(
        categories.named_options(account_id),
        payment_options.named_options(account_id),
    )?;

    let context = CommandContext {
        categories,
        payment_options,
        today: chrono::Utc::now().date_naive(),
    };

    let resolved = match state
        .interpreter
        .interpret(command, &context)
        .await
        .and_then(|interpreted| NumoChatService::resolve(interpreted, &context))
    {
        Ok(resolved) => resolved,
        Err(e) if e.is_client_error() => {
            info!(account_id = %account_id, error = %e, "NumoChat command rejected");
            return Ok(rejected(&e));
        }
        Err(e) => {
            warn!(account_id = %account_id, error = %e, "NumoChat interpreter unavailable");
            return Err(ApiError::from(e));
        }
    };

    let message = NumoChatService::summary(&resolved);
    let data = match &resolved {
        ResolvedEntry::Revenue(revenue) => {
            let created = RevenueRepository::new((*state.db).clone())
                .create(account_id, revenue)
                .await?;
            json!({"type": resolved.kind(), "entry": RevenueResponse::from(created)})
        }
        ResolvedEntry::Expense(expense) => {
            let created = ExpenseRepository::new((*state.db).clone())
                .create(account_id, expense)
                .await?;
            json!({"type": resolved.kind(), "entry": ExpenseResponse::from(created)})
        }
    };

    info!(account_id = %account_id, kind = %resolved.kind(), "NumoChat entry recorded");

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": message,
            "data": data
        })),
    )
        .into_response())
}
