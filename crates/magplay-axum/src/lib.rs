//! Axum HTTP adapter for magplay.
//!
//! Exposes the loopback playback endpoint: `/play` validates a link and
//! hands it to the [`PlaybackDispatcher`](magplay_core::PlaybackDispatcher),
//! `/ping` answers liveness checks. Every response carries permissive
//! cross-origin headers so browser extensions and userscripts can call it.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, bind_address, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
