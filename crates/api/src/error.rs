//! Conversion of domain errors into HTTP responses.
//!
//! Every domain error is funneled into [`AppError`], which picks the status
//! code and the stable error code. Server-side details are logged and
//! replaced by a generic message.

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use numo_core::analytics::AnalyticsError;
use numo_core::auth::{PasswordError, SignupError};
use numo_core::budget::BudgetError;
use numo_core::ledger::LedgerError;
use numo_core::numochat::NumoChatError;
use numo_db::repositories::{AccountError, BudgetRepoError, CatalogError, LedgerRepoError};
use numo_shared::types::PeriodError;
use numo_shared::{AppError, JwtError};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.message().to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<PeriodError> for ApiError {
    fn from(err: PeriodError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        let message = err.to_string();
        Self(match err {
            BudgetError::NotFound(_) => AppError::NotFound(message),
            BudgetError::DuplicatePeriod(_) => AppError::Conflict(message),
            _ => AppError::Validation(message),
        })
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        let message = err.to_string();
        Self(match err {
            AnalyticsError::NotFound(_) => AppError::NotFound(message),
            AnalyticsError::InvalidPeriod(_) => AppError::Validation(message),
            AnalyticsError::Source(_) => AppError::Internal(message),
        })
    }
}

impl From<BudgetRepoError> for ApiError {
    fn from(err: BudgetRepoError) -> Self {
        match err {
            BudgetRepoError::Budget(e) => e.into(),
            BudgetRepoError::Corrupt(msg) => Self(AppError::Internal(msg)),
            BudgetRepoError::Database(e) => e.into(),
        }
    }
}

impl From<LedgerRepoError> for ApiError {
    fn from(err: LedgerRepoError) -> Self {
        let message = err.to_string();
        match err {
            LedgerRepoError::NotFound(_) => Self(AppError::NotFound(message)),
            LedgerRepoError::UnknownCategory(_)
            | LedgerRepoError::UnknownPaymentOption(_) => Self(AppError::Validation(message)),
            LedgerRepoError::Invalid(e) => e.into(),
            LedgerRepoError::Corrupt(msg) => Self(AppError::Internal(msg)),
            LedgerRepoError::Database(e) => e.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound(_) => Self(AppError::NotFound(message)),
            CatalogError::Invalid(e) => e.into(),
            CatalogError::Database(e) => e.into(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::UsernameTaken(_) => Self(AppError::Conflict(message)),
            AccountError::Database(e) => e.into(),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingError(msg) => Self(AppError::Internal(msg)),
            JwtError::Expired => Self(AppError::Unauthorized("Token has expired".into())),
            JwtError::DecodingError(_) | JwtError::Invalid => {
                Self(AppError::Unauthorized("Invalid or malformed token".into()))
            }
        }
    }
}

impl From<NumoChatError> for ApiError {
    fn from(err: NumoChatError) -> Self {
        let message = err.to_string();
        if err.is_client_error() {
            Self(AppError::Validation(message))
        } else {
            Self(AppError::ExternalService(message))
        }
    }
}
