//! `magplay` command-line front end.
//!
//! Turns flags and environment variables into a
//! [`ServiceConfig`](magplay_core::ServiceConfig) and runs either the HTTP
//! service or a one-off installation check.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::service_config;
pub use commands::Commands;
pub use error::CliError;
pub use parser::{Cli, ServiceArgs};
