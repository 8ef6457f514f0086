//! CLI-specific error types.

use magplay_core::CoreError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid flag or environment value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Core domain error.
    #[error("{0}")]
    Core(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration(msg) => Self::Config(msg),
            other => Self::Core(other.to_string()),
        }
    }
}
