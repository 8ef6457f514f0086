//! Ordered fallback over playback strategies.
//!
//! For each strategy in order:
//! 1. Resolve its invocation. On failure, emit `ResolutionFailed` and move on
//!    without launching anything.
//! 2. Launch it. On failure, emit `LaunchFailed` and move on.
//! 3. On a successful spawn, emit `Spawned` and stop.
//!
//! Running off the end emits `Exhausted`. Exactly one of `Spawned` /
//! `Exhausted` is emitted per run.

use std::sync::Arc;
use tracing::{debug, info};

use magplay_core::{
    LaunchEvent, LaunchEventSink, PlaybackMode, PlaybackRequest, ProcessLauncher, ServiceConfig,
    SpawnAck, StrategyAttempt, StrategyKind, ToolLocator,
};

use super::{DirectPlayerStrategy, PlaybackStrategy, StreamStrategy};

/// How a chain run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// A strategy's process was spawned.
    Launched { kind: StrategyKind, ack: SpawnAck },
    /// No strategy could be launched.
    Exhausted { last_error: String },
}

/// Everything a chain run did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub attempts: Vec<StrategyAttempt>,
    pub outcome: ChainOutcome,
}

impl ChainReport {
    /// Strategy kinds tried, in order.
    pub fn tried(&self) -> Vec<StrategyKind> {
        self.attempts.iter().map(|a| a.kind).collect()
    }
}

/// The launch strategy chain.
pub struct LaunchChain {
    strategies: Vec<Arc<dyn PlaybackStrategy>>,
    locator: Arc<dyn ToolLocator>,
    launcher: Arc<dyn ProcessLauncher>,
    events: Arc<dyn LaunchEventSink>,
}

impl LaunchChain {
    pub fn new(
        strategies: Vec<Arc<dyn PlaybackStrategy>>,
        locator: Arc<dyn ToolLocator>,
        launcher: Arc<dyn ProcessLauncher>,
        events: Arc<dyn LaunchEventSink>,
    ) -> Self {
        Self {
            strategies,
            locator,
            launcher,
            events,
        }
    }

    /// Build the strategy list for the configured mode.
    ///
    /// Stream-first tries the streaming tool in both of its install shapes
    /// before giving up on streaming and opening the player directly.
    pub fn for_mode(
        config: &ServiceConfig,
        locator: Arc<dyn ToolLocator>,
        launcher: Arc<dyn ProcessLauncher>,
        events: Arc<dyn LaunchEventSink>,
    ) -> Self {
        let direct: Arc<dyn PlaybackStrategy> = Arc::new(DirectPlayerStrategy::new(config));
        let strategies: Vec<Arc<dyn PlaybackStrategy>> = match config.mode {
            PlaybackMode::StreamFirst => vec![
                Arc::new(StreamStrategy::primary(config)),
                Arc::new(StreamStrategy::alternate(config)),
                direct,
            ],
            PlaybackMode::DirectOnly => vec![direct],
        };
        Self::new(strategies, locator, launcher, events)
    }

    /// Strategy kinds in the order they will be tried.
    pub fn kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Walk the chain for one request.
    pub async fn run(&self, request_id: u64, request: &PlaybackRequest) -> ChainReport {
        let mut attempts = Vec::with_capacity(self.strategies.len());
        let mut last_error = String::from("no playback strategies configured");

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let mut attempt = StrategyAttempt::pending(kind);
            debug!(request_id, strategy = %kind, "trying strategy");

            let invocation = match strategy.resolve(self.locator.as_ref()).await {
                Ok(invocation) => invocation,
                Err(e) => {
                    last_error = e.to_string();
                    attempt.fail(last_error.clone());
                    attempts.push(attempt);
                    self.events
                        .emit(LaunchEvent::resolution_failed(request_id, kind, &last_error));
                    continue;
                }
            };

            let args = strategy.arguments(request);
            match self.launcher.launch(&invocation, &args).await {
                Ok(ack) => {
                    attempt.succeed();
                    attempts.push(attempt);
                    self.events.emit(LaunchEvent::spawned(
                        request_id,
                        kind,
                        invocation.to_string(),
                        ack.pid,
                    ));
                    return ChainReport {
                        attempts,
                        outcome: ChainOutcome::Launched { kind, ack },
                    };
                }
                Err(e) => {
                    last_error = e.to_string();
                    attempt.fail(last_error.clone());
                    attempts.push(attempt);
                    strategy.on_launch_failure(self.locator.as_ref());
                    self.events
                        .emit(LaunchEvent::launch_failed(request_id, kind, &last_error));
                    if kind.is_terminal() {
                        info!(request_id, strategy = %kind, "terminal strategy failed, no further fallback");
                    }
                }
            }
        }

        self.events
            .emit(LaunchEvent::exhausted(request_id, &last_error));
        ChainReport {
            attempts,
            outcome: ChainOutcome::Exhausted { last_error },
        }
    }
}
