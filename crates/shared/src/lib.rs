//! Shared types, errors, and configuration for Numo.
//!
//! This crate provides common types used across all other crates:
//! - Integer minor-unit money (`Cents`)
//! - Typed IDs for type-safe entity references
//! - Budget periods (month + year)
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT handling and auth payloads

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::{AppConfig, DatabaseConfig, JwtConfig, NumoChatConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
