//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;
pub mod period;

#[cfg(test)]
mod id_tests;

pub use id::*;
pub use money::Cents;
pub use pagination::{PageMeta, PageRequest, PageResponse};
pub use period::{Period, PeriodError};
