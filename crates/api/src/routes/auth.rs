//! Authentication routes for signup, login, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use numo_core::auth::{hash_password, validate_signup, verify_password};
use numo_db::{AccountRepository, entities::accounts};
use numo_shared::AppError;
use numo_shared::auth::{
    AccountInfo, AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, SignupRequest,
};
use numo_shared::types::AccountId;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthorized("Invalid username or password".into()))
}

/// Issues both tokens for an account.
fn issue_tokens(state: &AppState, account: accounts::Model) -> ApiResult<AuthResponse> {
    let access_token = state
        .jwt_service
        .generate_access_token(account.id, &account.username)?;
    let refresh_token = state
        .jwt_service
        .generate_refresh_token(account.id, &account.username)?;

    Ok(AuthResponse {
        account: AccountInfo {
            id: account.id,
            name: account.name,
            email: account.email,
            username: account.username,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/signup - Create an account and return tokens.
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_signup(&payload)?;

    let username = payload.username.trim();
    let account_repo = AccountRepository::new((*state.db).clone());

    if account_repo.username_exists(username).await? {
        return Err(ApiError(AppError::Conflict(format!(
            "Username already taken: {username}"
        ))));
    }

    let password_hash = hash_password(&payload.password)?;
    let account = account_repo
        .create(
            payload.name.trim(),
            payload.email.as_deref().map(str::trim),
            username,
            &password_hash,
        )
        .await?;

    info!(account_id = %account.id, "Account created");

    Ok((StatusCode::CREATED, Json(issue_tokens(&state, account)?)))
}

/// POST /auth/login - Authenticate and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let account_repo = AccountRepository::new((*state.db).clone());

    let Some(account) = account_repo
        .find_by_username(payload.username.trim())
        .await?
    else {
        info!(username = %payload.username, "Login attempt for unknown username");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &account.password_hash)? {
        info!(account_id = %account.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    info!(account_id = %account.id, "Account logged in");

    Ok(Json(issue_tokens(&state, account)?))
}

/// POST /auth/refresh - Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = state
        .jwt_service
        .validate_refresh_token(&payload.refresh_token)?;

    let account = AccountRepository::new((*state.db).clone())
        .find_by_id(AccountId::from_uuid(claims.account_id()))
        .await?
        .ok_or_else(|| ApiError(AppError::Unauthorized("Account no longer exists".into())))?;

    let access_token = state
        .jwt_service
        .generate_access_token(account.id, &account.username)?;

    Ok(Json(RefreshResponse {
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_support::{FakeInterpreter, send, test_state};

    async fn app() -> Router {
        routes().with_state(test_state(FakeInterpreter::replying(None)).await)
    }

    #[tokio::test]
    async fn test_signup_login_refresh() {
        let app = app().await;

        let (status, body) = send(
            app.clone(),
            "POST",
            "/auth/signup",
            None,
            Some(json!({
                "name": "Maria",
                "email": "maria@example.com",
                "username": "maria",
                "password": "secret123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["account"]["username"], "maria");
        assert!(body["access_token"].is_string());

        let (status, body) = send(
            app.clone(),
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "maria", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

        let (status, body) = send(
            app.clone(),
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": refresh_token})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["access_token"].is_string());

        // An access token is not accepted as a refresh token.
        let access_token = body["access_token"].as_str().unwrap().to_string();
        let (status, _) = send(
            app,
            "POST",
            "/auth/refresh",
            None,
            Some(json!({"refresh_token": access_token})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicates_and_bad_input() {
        let app = app().await;
        let payload = json!({"name": "Maria", "username": "maria", "password": "secret123"});

        let (status, _) = send(app.clone(), "POST", "/auth/signup", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app.clone(), "POST", "/auth/signup", None, Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");

        let (status, body) = send(
            app,
            "POST",
            "/auth/signup",
            None,
            Some(json!({"name": "Jo", "username": "jo", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let app = app().await;
        send(
            app.clone(),
            "POST",
            "/auth/signup",
            None,
            Some(json!({"name": "Maria", "username": "maria", "password": "secret123"})),
        )
        .await;

        let (status, body) = send(
            app.clone(),
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "maria", "password": "wrong-password"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = send(
            app,
            "POST",
            "/auth/login",
            None,
            Some(json!({"username": "nobody", "password": "secret123"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
