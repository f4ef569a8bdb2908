//! Expense category routes.

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

use crate::error::{ApiError, ApiResult};
use crate::extract::Path;
use crate::{AppState, middleware::AuthUser};
use numo_db::{CategoryRepository, entities::expense_categories};
use numo_shared::AppError;
use numo_shared::types::CategoryId;

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{category_id}",
            get(get_category).put(rename_category).delete(delete_category),
        )
}

/// Request body for creating or renaming a named record.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    /// Display name.
    pub name: String,
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<expense_categories::Model> for CategoryResponse {
    fn from(c: expense_categories::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at.to_utc(),
            updated_at: c.updated_at.to_utc(),
        }
    }
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<NameRequest>,
) -> ApiResult<impl IntoResponse> {
    let category = CategoryRepository::new((*state.db).clone())
        .create(auth.account_id(), &payload.name)
        .await?;

    info!(account_id = %auth.account_id(), category_id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// GET /categories - List live categories by name.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = CategoryRepository::new((*state.db).clone())
        .list(auth.account_id())
        .await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// GET `/categories/{category_id}` - Get one category.
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<CategoryId>,
) -> ApiResult<Json<CategoryResponse>> {
    CategoryRepository::new((*state.db).clone())
        .find(auth.account_id(), category_id)
        .await?
        .map(|c| Json(CategoryResponse::from(c)))
        .ok_or_else(|| ApiError(AppError::NotFound(format!("Category not found: {category_id}"))))
}

/// PUT `/categories/{category_id}` - Rename a category.
async fn rename_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<CategoryId>,
    Json(payload): Json<NameRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = CategoryRepository::new((*state.db).clone())
        .rename(auth.account_id(), category_id, &payload.name)
        .await?;
    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE `/categories/{category_id}` - Soft-delete a category.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<CategoryId>,
) -> ApiResult<StatusCode> {
    CategoryRepository::new((*state.db).clone())
        .delete(auth.account_id(), category_id)
        .await?;

    info!(account_id = %auth.account_id(), category_id = %category_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
