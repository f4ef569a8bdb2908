//! Revenue routes.

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

use super::PeriodQuery;
use crate::error::{ApiError, ApiResult};
use crate::extract::{Path, Query};
use crate::{AppState, middleware::AuthUser};
use numo_core::ledger::{EntryStatus, NewRevenue, RevenuePatch};
use numo_db::{RevenueRepository, entities::revenues};
use numo_shared::AppError;
use numo_shared::types::{Cents, RevenueId};

/// Creates the revenue routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revenues", get(list_revenues).post(create_revenue))
        .route(
            "/revenues/{revenue_id}",
            get(get_revenue).put(update_revenue).delete(delete_revenue),
        )
}

/// Response for a revenue.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// Revenue ID.
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
    /// Payment option.
    pub payment_option_id: Option<Uuid>,
    /// Soft-delete status.
    pub status: EntryStatus,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<revenues::Model> for RevenueResponse {
    fn from(r: revenues::Model) -> Self {
        Self {
            id: r.id,
            month: r.month,
            year: r.year,
            day: r.day,
            amount: Cents::new(r.amount),
            description: r.description,
            payment_option_id: r.payment_option_id,
            status: EntryStatus::from_tombstone(r.deleted_at.as_ref()),
            created_at: r.created_at.to_utc(),
            updated_at: r.updated_at.to_utc(),
        }
    }
}

/// POST /revenues - Record a revenue.
async fn create_revenue(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NewRevenue>,
) -> ApiResult<impl IntoResponse> {
    let revenue = RevenueRepository::new((*state.db).clone())
        .create(auth.account_id(), &payload)
        .await?;

    info!(account_id = %auth.account_id(), revenue_id = %revenue.id, "Revenue created");

    Ok((StatusCode::CREATED, Json(RevenueResponse::from(revenue))))
}

/// GET /revenues - List live revenues, optionally for one period.
async fn list_revenues(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<RevenueResponse>>> {
    let revenues = RevenueRepository::new((*state.db).clone())
        .list(auth.account_id(), query.period()?)
        .await?;
    Ok(Json(revenues.into_iter().map(RevenueResponse::from).collect()))
}

/// GET `/revenues/{revenue_id}` - Get one revenue.
async fn get_revenue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(revenue_id): Path<RevenueId>,
) -> ApiResult<Json<RevenueResponse>> {
    RevenueRepository::new((*state.db).clone())
        .find(auth.account_id(), revenue_id)
        .await?
        .map(|r| Json(RevenueResponse::from(r)))
        .ok_or_else(|| ApiError(AppError::NotFound(format!("Revenue not found: {revenue_id}"))))
}

/// PUT `/revenues/{revenue_id}` - Partially update a revenue.
async fn update_revenue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(revenue_id): Path<RevenueId>,
    Json(payload): Json<RevenuePatch>,
) -> ApiResult<Json<RevenueResponse>> {
    let revenue = RevenueRepository::new((*state.db).clone())
        .update(auth.account_id(), revenue_id, &payload)
        .await?;
    Ok(Json(RevenueResponse::from(revenue)))
}

/// DELETE `/revenues/{revenue_id}` - Soft-delete a revenue.
async fn delete_revenue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(revenue_id): Path<RevenueId>,
) -> ApiResult<StatusCode> {
    RevenueRepository::new((*state.db).clone())
        .delete(auth.account_id(), revenue_id)
        .await?;

    info!(account_id = %auth.account_id(), revenue_id = %revenue_id, "Revenue deleted");

    Ok(StatusCode::NO_CONTENT)
}
