//! Budget periods: a calendar month within a year.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest year accepted for a period.
pub const MIN_YEAR: i32 = 2000;
/// Latest year accepted for a period.
pub const MAX_YEAR: i32 = 9999;

/// Errors raised when constructing a [`Period`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1..=12.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year outside the supported range.
    #[error("year must be between 2000 and 9999, got {0}")]
    InvalidYear(i32),
}

/// A (month, year) pair identifying one budget period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    // Field order gives chronological `Ord`.
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for Period {
    type Error = PeriodError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.month, raw.year)
    }
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError` if the month or year is out of range.
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PeriodError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Month number, 1 through 12.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The preceding month. January wraps to December of the previous year.
    ///
    /// The result is not range-checked, so January 2000 yields December 1999.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
