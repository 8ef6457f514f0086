//! Process runtime for magplay.
//!
//! Locates external tools, launches them detached, and walks the playback
//! strategy chain for each dispatched request.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod diagnostics;
pub mod events;
pub mod launcher;
pub mod locator;
mod service;
pub mod strategy;

// Re-export the main port implementations
pub use events::LaunchEventBroadcaster;
pub use launcher::DetachedLauncher;
pub use locator::{CachingLocator, CommandProbe, ExecutableLocator, ProbeError, SystemCommandProbe};
pub use service::{PanicHandler, PlaybackService};
pub use strategy::{ChainOutcome, ChainReport, LaunchChain, PlaybackStrategy};

// Re-export diagnostics entry points
pub use diagnostics::{DiagnosticsReport, ToolDiagnostic, ToolStatus, probe_installation};

#[cfg(test)]
use tempfile as _;
