//! Domain types for playback dispatch.

mod invocation;
mod request;
mod strategy;

pub use invocation::{Invocation, SpawnAck};
pub use request::{MAGNET_PREFIX, PlaybackRequest};
pub use strategy::{StrategyAttempt, StrategyKind, StrategyResult};
