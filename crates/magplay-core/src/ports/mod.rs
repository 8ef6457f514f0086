//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the playback domain expects from
//! infrastructure. They use only domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process` or filesystem types in any signature
//! - No HTTP framework types in any signature
//! - Launching is one-shot: a port returns a spawn acknowledgement, never a
//!   handle to manage the process afterwards

pub mod dispatcher;
pub mod event_sink;
pub mod launcher;
pub mod locator;

use thiserror::Error;

pub use dispatcher::PlaybackDispatcher;
pub use event_sink::{LaunchEventSink, NoopEventSink};
pub use launcher::ProcessLauncher;
pub use locator::ToolLocator;

/// A playback request was rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No `link` value (or an empty one).
    #[error("Missing link parameter")]
    MissingLink,

    /// The link does not start with the magnet scheme prefix.
    #[error("Invalid link")]
    InvalidLink,
}

/// A tool could not be located.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No probe found the tool. `last_error` is the last failure observed.
    #[error("could not locate '{tool}': {last_error}")]
    NotFound { tool: String, last_error: String },
}

impl ResolutionError {
    pub fn not_found(tool: impl Into<String>, last_error: impl ToString) -> Self {
        Self::NotFound {
            tool: tool.into(),
            last_error: last_error.to_string(),
        }
    }
}

/// The OS could not start a located tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("failed to spawn '{command}': {reason}")]
    Spawn { command: String, reason: String },
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
