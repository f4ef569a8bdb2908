//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - JWT authentication middleware
//! - Domain error to HTTP response mapping
//! - The language-model client behind NumoChat

pub mod clients;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use numo_core::numochat::CommandInterpreter;
use numo_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Interpreter for NumoChat commands.
    pub interpreter: Arc<dyn CommandInterpreter>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
