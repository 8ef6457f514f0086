//! Executable location for external playback tools.
//!
//! ## Architecture
//!
//! - `probe`: bounded subprocess probes (injectable for testing)
//! - `resolve`: two-tier search path / package root resolution
//! - `cache`: optional TTL memoisation in front of any locator
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use magplay_core::{StreamToolConfig, ToolLocator};
//! use magplay_runtime::locator::{ExecutableLocator, SystemCommandProbe};
//!
//! # async fn demo() {
//! let probe = Arc::new(SystemCommandProbe::new(Duration::from_secs(5)));
//! let locator = ExecutableLocator::new(probe, &StreamToolConfig::default());
//! match locator.locate("peerflix").await {
//!     Ok(invocation) => println!("run as: {invocation}"),
//!     Err(e) => println!("{e}"),
//! }
//! # }
//! ```

mod cache;
mod probe;
mod resolve;

pub use cache::CachingLocator;
pub use probe::{CommandProbe, ProbeError, SystemCommandProbe};
pub use resolve::ExecutableLocator;
