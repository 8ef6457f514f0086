//! Launch lifecycle events.
//!
//! Process startup is not synchronous with the HTTP reply, so the outcome
//! of a dispatched request is only visible through these events. Every
//! dispatched request produces exactly one terminal event: `Spawned` or
//! `Exhausted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::StrategyKind;

/// Event emitted while a request moves through the launch chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LaunchEvent {
    /// The request was accepted and handed to the chain.
    #[serde(rename_all = "camelCase")]
    Dispatched {
        request_id: u64,
        link: String,
        at: DateTime<Utc>,
    },

    /// A strategy's tool could not be located; the chain moves on.
    #[serde(rename_all = "camelCase")]
    ResolutionFailed {
        request_id: u64,
        strategy: StrategyKind,
        reason: String,
        at: DateTime<Utc>,
    },

    /// The OS refused to start a located tool; the chain moves on
    /// unless the strategy was terminal.
    #[serde(rename_all = "camelCase")]
    LaunchFailed {
        request_id: u64,
        strategy: StrategyKind,
        reason: String,
        at: DateTime<Utc>,
    },

    /// A process was started. Terminal.
    #[serde(rename_all = "camelCase")]
    Spawned {
        request_id: u64,
        strategy: StrategyKind,
        command: String,
        pid: Option<u32>,
        at: DateTime<Utc>,
    },

    /// Every strategy failed. Terminal.
    #[serde(rename_all = "camelCase")]
    Exhausted {
        request_id: u64,
        last_error: String,
        at: DateTime<Utc>,
    },
}

impl LaunchEvent {
    pub fn dispatched(request_id: u64, link: impl Into<String>) -> Self {
        Self::Dispatched {
            request_id,
            link: link.into(),
            at: Utc::now(),
        }
    }

    pub fn resolution_failed(request_id: u64, strategy: StrategyKind, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            request_id,
            strategy,
            reason: reason.into(),
            at: Utc::now(),
        }
    }

    pub fn launch_failed(request_id: u64, strategy: StrategyKind, reason: impl Into<String>) -> Self {
        Self::LaunchFailed {
            request_id,
            strategy,
            reason: reason.into(),
            at: Utc::now(),
        }
    }

    pub fn spawned(
        request_id: u64,
        strategy: StrategyKind,
        command: impl Into<String>,
        pid: Option<u32>,
    ) -> Self {
        Self::Spawned {
            request_id,
            strategy,
            command: command.into(),
            pid,
            at: Utc::now(),
        }
    }

    pub fn exhausted(request_id: u64, last_error: impl Into<String>) -> Self {
        Self::Exhausted {
            request_id,
            last_error: last_error.into(),
            at: Utc::now(),
        }
    }

    /// Request this event belongs to.
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::Dispatched { request_id, .. }
            | Self::ResolutionFailed { request_id, .. }
            | Self::LaunchFailed { request_id, .. }
            | Self::Spawned { request_id, .. }
            | Self::Exhausted { request_id, .. } => *request_id,
        }
    }

    /// Whether no further events follow for this request.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Spawned { .. } | Self::Exhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_event_serialization() {
        let event = LaunchEvent::spawned(7, StrategyKind::DirectPlayer, "vlc", Some(4242));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"spawned\""));
        assert!(json.contains("\"requestId\":7"));
        assert!(json.contains("\"strategy\":\"direct-player\""));
        assert!(json.contains("\"pid\":4242"));
    }

    #[test]
    fn only_spawned_and_exhausted_are_terminal() {
        assert!(LaunchEvent::spawned(1, StrategyKind::BufferedStream, "peerflix", None).is_terminal());
        assert!(LaunchEvent::exhausted(1, "no player").is_terminal());
        assert!(!LaunchEvent::dispatched(1, "magnet:?xt=1").is_terminal());
        assert!(!LaunchEvent::resolution_failed(1, StrategyKind::BufferedStream, "x").is_terminal());
        assert!(!LaunchEvent::launch_failed(1, StrategyKind::BufferedStream, "x").is_terminal());
    }

    #[test]
    fn request_id_is_exposed_for_every_variant() {
        assert_eq!(LaunchEvent::exhausted(11, "x").request_id(), 11);
        assert_eq!(LaunchEvent::dispatched(12, "magnet:?").request_id(), 12);
    }
}
