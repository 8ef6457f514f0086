//! HTTP request handlers.
//!
//! Handlers are thin: they validate input and delegate to the
//! `PlaybackDispatcher` held in the application state.

pub mod ping;
pub mod play;

use crate::error::HttpError;

/// Fallback for every unrouted path.
pub async fn not_found() -> HttpError {
    HttpError::NotFound
}
