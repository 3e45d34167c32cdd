//! API endpoint handlers.
//!
//! Handlers are thin: validation lives in `models`, composition in
//! `explain`.

pub mod explain;
pub mod form;
pub mod glossary;
pub mod health;

use crate::api::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
