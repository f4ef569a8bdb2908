//! API route definitions.

use axum::{Router, middleware};
use numo_shared::AppError;
use numo_shared::types::Period;

use crate::{AppState, middleware::auth_middleware};

pub mod abstracts;
pub mod auth;
pub mod categories;
pub mod expenses;
pub mod health;
pub mod numochat;
pub mod payment_options;
pub mod revenues;
pub mod transactions;

/// Query parameters selecting a budget period.
#[derive(Debug, Default, serde::Deserialize)]
pub struct PeriodQuery {
    /// Budget month (1-12).
    pub month: Option<u32>,
    /// Budget year.
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolves the filter; month and year must be given together.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a half-specified or invalid period.
    pub fn period(&self) -> Result<Option<Period>, AppError> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => Ok(Some(Period::new(month, year)?)),
            (None, None) => Ok(None),
            _ => Err(AppError::Validation(
                "month and year must be provided together".into(),
            )),
        }
    }
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(abstracts::routes())
        .merge(revenues::routes())
        .merge(expenses::routes())
        .merge(categories::routes())
        .merge(payment_options::routes())
        .merge(transactions::routes())
        .merge(numochat::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_query() {
        let both = PeriodQuery {
            month: Some(6),
            year: Some(2024),
        };
        assert_eq!(both.period().unwrap().unwrap().to_string(), "2024-06");
        assert!(PeriodQuery::default().period().unwrap().is_none());

        let half = PeriodQuery {
            month: Some(6),
            year: None,
        };
        assert!(half.period().is_err());

        let invalid = PeriodQuery {
            month: Some(13),
            year: Some(2024),
        };
        assert!(invalid.period().is_err());
    }
}
