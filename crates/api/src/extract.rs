//! Request extractors whose rejections render as [`ApiError`].
//!
//! Axum's own `Path` and `Query` reject with a plain-text body. These
//! wrappers keep every client error in the `{"error", "message"}` shape.

use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// Path parameters. Rejections become `validation_error`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

/// Query parameters. Rejections become `validation_error`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);
