//! Core domain types and port definitions for magplay.
//!
//! This crate holds everything the playback service talks about
//! (requests, invocations, strategy outcomes, configuration, events)
//! and the traits that the runtime and HTTP adapters implement.
//! It has no process, filesystem or HTTP code of its own.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod events;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_BUFFER_KB, DEFAULT_META_TITLE, DEFAULT_PORT, DEFAULT_PROBE_TIMEOUT, PlaybackMode,
    ServiceConfig, StreamToolConfig, default_player_path,
};
pub use domain::{
    Invocation, MAGNET_PREFIX, PlaybackRequest, SpawnAck, StrategyAttempt, StrategyKind,
    StrategyResult,
};
pub use events::LaunchEvent;
pub use ports::{
    CoreError, LaunchError, LaunchEventSink, NoopEventSink, PlaybackDispatcher, ProcessLauncher,
    ResolutionError, ToolLocator, ValidationError,
};
