//! Payment option routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::categories::NameRequest;
use crate::error::{ApiError, ApiResult};
use crate::extract::Path;
use crate::{AppState, middleware::AuthUser};
use numo_db::{PaymentOptionRepository, entities::payment_options};
use numo_shared::AppError;
use numo_shared::types::PaymentOptionId;

/// Creates the payment option routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment-options", get(list_options).post(create_option))
        .route(
            "/payment-options/{payment_option_id}",
            get(get_option).put(rename_option).delete(delete_option),
        )
}

/// Response for a payment option.
#[derive(Debug, Serialize)]
pub struct PaymentOptionResponse {
    /// Payment option ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<payment_options::Model> for PaymentOptionResponse {
    fn from(o: payment_options::Model) -> Self {
        Self {
            id: o.id,
            name: o.name,
            created_at: o.created_at.to_utc(),
            updated_at: o.updated_at.to_utc(),
        }
    }
}

/// POST /payment-options - Create a payment option.
async fn create_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NameRequest>,
) -> ApiResult<impl IntoResponse> {
    let option = PaymentOptionRepository::new((*state.db).clone())
        .create(auth.account_id(), &payload.name)
        .await?;

    info!(account_id = %auth.account_id(), payment_option_id = %option.id, "Payment option created");

    Ok((StatusCode::CREATED, Json(PaymentOptionResponse::from(option))))
}

/// GET /payment-options - List live payment options.
async fn list_options(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PaymentOptionResponse>>> {
    let options = PaymentOptionRepository::new((*state.db).clone())
        .list(auth.account_id())
        .await?;
    Ok(Json(options.into_iter().map(PaymentOptionResponse::from).collect()))
}

/// GET `/payment-options/{payment_option_id}` - Get one payment option.
async fn get_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_option_id): Path<PaymentOptionId>,
) -> ApiResult<Json<PaymentOptionResponse>> {
    PaymentOptionRepository::new((*state.db).clone())
        .find(auth.account_id(), payment_option_id)
        .await?
        .map(|o| Json(PaymentOptionResponse::from(o)))
        .ok_or_else(|| {
            ApiError(AppError::NotFound(format!(
                "Payment option not found: {payment_option_id}"
            )))
        })
}

/// PUT `/payment-options/{payment_option_id}` - Rename a payment option.
async fn rename_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_option_id): Path<PaymentOptionId>,
    Json(payload): Json<NameRequest>,
) -> ApiResult<Json<PaymentOptionResponse>> {
    let option = PaymentOptionRepository::new((*state.db).clone())
        .rename(auth.account_id(), payment_option_id, &payload.name)
        .await?;
    Ok(Json(PaymentOptionResponse::from(option)))
}

/// DELETE `/payment-options/{payment_option_id}` - Soft-delete a payment option.
async fn delete_option(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_option_id): Path<PaymentOptionId>,
) -> ApiResult<StatusCode> {
    PaymentOptionRepository::new((*state.db).clone())
        .delete(auth.account_id(), payment_option_id)
        .await?;

    info!(
        account_id = %auth.account_id(),
        payment_option_id = %payment_option_id,
        "Payment option deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_support::{FakeInterpreter, login_as, protected, send, test_state};

    #[tokio::test]
    async fn test_payment_options_are_scoped_to_account() {
        let state = test_state(FakeInterpreter::replying(None)).await;
        let (_, token) = login_as(&state).await;
        let (_, stranger_token) = login_as(&state).await;
        let app = protected(routes(), &state);

        let (status, created) = send(
            app.clone(),
            "POST",
            "/payment-options",
            Some(&token),
            Some(json!({"name": "Credit card"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let uri = format!("/payment-options/{}", created["id"].as_str().unwrap());

        let (status, body) = send(app.clone(), "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Credit card");

        let (status, _) = send(app.clone(), "GET", &uri, Some(&stranger_token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, "DELETE", &uri, Some(&stranger_token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
