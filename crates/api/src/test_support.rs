//! Helpers for router tests against an in-memory database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
    middleware::from_fn_with_state,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use tower::ServiceExt;
use uuid::Uuid;

use numo_core::numochat::{CommandContext, CommandInterpreter, InterpretedCommand, NumoChatError};
use numo_db::AccountRepository;
use numo_db::migration::{Migrator, MigratorTrait};
use numo_shared::types::AccountId;
use numo_shared::{JwtConfig, JwtService};

use crate::AppState;
use crate::middleware::auth_middleware;

/// Interpreter returning a canned reply.
pub struct FakeInterpreter {
    reply: Mutex<Option<InterpretedCommand>>,
}

impl FakeInterpreter {
    pub fn replying(reply: Option<InterpretedCommand>) -> Self {
        Self {
            reply: Mutex::new(reply),
        }
    }
}

#[async_trait]
impl CommandInterpreter for FakeInterpreter {
    async fn interpret(
        &self,
        _command: &str,
        _context: &CommandContext,
    ) -> Result<InterpretedCommand, NumoChatError> {
        self.reply
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| NumoChatError::Unparseable("no entry found".into()))
    }
}

/// Builds state over a freshly migrated in-memory database.
pub async fn test_state(interpreter: FakeInterpreter) -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(JwtConfig {
            secret: "test-secret-key-for-router-tests".into(),
            ..JwtConfig::default()
        })),
        interpreter: Arc::new(interpreter),
    }
}

/// Creates an account and returns its ID with a valid access token.
pub async fn login_as(state: &AppState) -> (AccountId, String) {
    let username = format!("user-{}", &Uuid::new_v4().simple().to_string()[..8]);
    let account = AccountRepository::new((*state.db).clone())
        .create("Test User", None, &username, "$argon2id$test_hash")
        .await
        .expect("Failed to create account");
    let token = state
        .jwt_service
        .generate_access_token(account.id, &username)
        .expect("should generate token");
    (AccountId::from_uuid(account.id), token)
}

/// Wraps routes the way the API does: auth middleware plus state.
pub fn protected(routes: Router<AppState>, state: &AppState) -> Router {
    routes
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state.clone())
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
