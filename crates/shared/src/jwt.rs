//! JWT token generation and validation.
//!
//! Access and refresh tokens share a signing key and are told apart by the
//! `kind` claim.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Claims, TokenKind};
pub use crate::config::JwtConfig;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is valid but of the wrong kind.
    #[error("invalid token")]
    Invalid,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry_secs", &self.config.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.config.refresh_token_expiry_secs)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generates an access token for an account.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(
        &self,
        account_id: Uuid,
        username: &str,
    ) -> Result<String, JwtError> {
        self.generate(
            account_id,
            username,
            TokenKind::Access,
            self.config.access_token_expiry_secs,
        )
    }

    /// Generates a refresh token for an account.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_refresh_token(
        &self,
        account_id: Uuid,
        username: &str,
    ) -> Result<String, JwtError> {
        self.generate(
            account_id,
            username,
            TokenKind::Refresh,
            self.config.refresh_token_expiry_secs,
        )
    }

    fn generate(
        &self,
        account_id: Uuid,
        username: &str,
        kind: TokenKind,
        expiry_secs: u64,
    ) -> Result<String, JwtError> {
        let secs = i64::try_from(expiry_secs).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + Duration::seconds(secs);
        let claims = Claims::new(account_id, username, kind, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token of any kind.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Validates an access token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Invalid` when given a refresh token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_kind(token, TokenKind::Access)
    }

    /// Validates a refresh token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Invalid` when given an access token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_kind(token, TokenKind::Refresh)
    }

    fn validate_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.kind == kind {
            Ok(claims)
        } else {
            Err(JwtError::Invalid)
        }
    }

    /// Returns the access token expiration in seconds.
    #[must_use]
    pub fn access_token_expires_in(&self) -> i64 {
        i64::try_from(self.config.access_token_expiry_secs).unwrap_or(i64::MAX)
    }
}
