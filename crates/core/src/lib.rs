//! Core business logic for Numo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `analytics` - Actual vs planned, trends and year-end projections
//! - `budget` - Monthly budget plans
//! - `ledger` - Revenue and expense rules
//! - `auth` - Password hashing and signup rules
//! - `numochat` - Natural-language entry

pub mod analytics;
pub mod auth;
pub mod budget;
pub mod ledger;
pub mod numochat;
