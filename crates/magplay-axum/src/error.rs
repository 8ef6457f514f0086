//! HTTP error type and its mapping from core errors.
//!
//! Bodies are plain text. Clients of this service are userscripts that
//! show the body verbatim, so no JSON envelope is used.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use magplay_core::CoreError;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (missing or malformed link).
    #[error("{0}")]
    BadRequest(String),

    /// Unknown path.
    #[error("not found")]
    NotFound,

    /// Dispatch failed before the launch chain could be started.
    #[error("error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if let Self::Internal(msg) = &self {
            error!(error = %msg, "Request failed");
        }
        (self.status(), self.to_string()).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
