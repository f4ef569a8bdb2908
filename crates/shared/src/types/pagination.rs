//! Pagination types for list endpoints.
//!
//! Pages are fetched with one extra row so `has_more` is known without a
//! count query.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    25
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Checks `page >= 1` and `1 <= limit <= 100`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when either bound is violated.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page == 0 {
            return Err(AppError::Validation("page must be at least 1".into()));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Number of rows to fetch: one past the page size.
    #[must_use]
    pub fn fetch_limit(&self) -> u64 {
        u64::from(self.limit) + 1
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Whether another page follows.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Builds a page from rows fetched with [`PageRequest::fetch_limit`].
    #[must_use]
    pub fn from_fetched(mut rows: Vec<T>, request: PageRequest) -> Self {
        let limit = request.limit as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        Self {
            data: rows,
            pagination: PageMeta {
                page: request.page,
                limit: request.limit,
                has_more,
            },
        }
    }
}
