//! Authentication payloads and JWT claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token accepted by the API middleware.
    Access,
    /// Long-lived token accepted only by the refresh endpoint.
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID).
    pub sub: Uuid,
    /// Account username.
    pub username: String,
    /// Token kind.
    pub kind: TokenKind,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an account.
    #[must_use]
    pub fn new(
        account_id: Uuid,
        username: &str,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id,
            username: username.to_string(),
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the account ID from claims.
    #[must_use]
    pub const fn account_id(&self) -> Uuid {
        self.sub
    }

    /// Returns true for access tokens.
    #[must_use]
    pub fn is_access(&self) -> bool {
        self.kind == TokenKind::Access
    }
}

/// Signup request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Optional contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Login username (at least 3 characters).
    pub username: String,
    /// Password (at least 6 characters).
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Refresh token request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token.
    pub refresh_token: String,
}

/// Account info returned in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct AccountInfo {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Username.
    pub username: String,
}

/// Signup and login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Authenticated account.
    pub account: AccountInfo,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

/// Refresh response payload.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}
