//! Playback strategies and the chain that walks them.
//!
//! A strategy knows which tool it needs, how to resolve it and which
//! arguments that tool takes. The chain owns ordering and fallback.

mod chain;
mod direct;
mod stream;

use async_trait::async_trait;

use magplay_core::{Invocation, PlaybackRequest, ResolutionError, StrategyKind, ToolLocator};

pub use chain::{ChainOutcome, ChainReport, LaunchChain};
pub use direct::DirectPlayerStrategy;
pub use stream::StreamStrategy;

/// One way of getting a link in front of the user.
#[async_trait]
pub trait PlaybackStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Work out how to run this strategy's tool.
    async fn resolve(&self, locator: &dyn ToolLocator) -> Result<Invocation, ResolutionError>;

    /// Arguments for the tool, appended after the invocation's prefix.
    fn arguments(&self, request: &PlaybackRequest) -> Vec<String>;

    /// Called when a resolved invocation could not be spawned.
    fn on_launch_failure(&self, _locator: &dyn ToolLocator) {}
}
