//! Strategy identities and per-attempt outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The playback strategies the launch chain knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Streaming tool resolved from the search path or the package root.
    BufferedStream,
    /// Streaming tool run through its interpreter from the package root.
    AlternateBufferedStream,
    /// The player executable itself. Terminal: nothing follows it.
    DirectPlayer,
}

impl StrategyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BufferedStream => "buffered-stream",
            Self::AlternateBufferedStream => "alternate-buffered-stream",
            Self::DirectPlayer => "direct-player",
        }
    }

    /// Whether a failure of this strategy ends the chain.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::DirectPlayer)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum StrategyResult {
    Pending,
    Succeeded,
    Failed(String),
}

impl StrategyResult {
    /// True once the attempt has either succeeded or failed.
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One strategy the chain tried, with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAttempt {
    pub kind: StrategyKind,
    pub result: StrategyResult,
}

impl StrategyAttempt {
    pub const fn pending(kind: StrategyKind) -> Self {
        Self {
            kind,
            result: StrategyResult::Pending,
        }
    }

    pub fn succeed(&mut self) {
        self.result = StrategyResult::Succeeded;
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.result = StrategyResult::Failed(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_direct_player_is_terminal() {
        assert!(StrategyKind::DirectPlayer.is_terminal());
        assert!(!StrategyKind::BufferedStream.is_terminal());
        assert!(!StrategyKind::AlternateBufferedStream.is_terminal());
    }

    #[test]
    fn attempt_moves_from_pending_to_settled() {
        let mut attempt = StrategyAttempt::pending(StrategyKind::BufferedStream);
        assert!(!attempt.result.is_settled());

        attempt.fail("spawn peerflix ENOENT");
        assert_eq!(attempt.result, StrategyResult::Failed("spawn peerflix ENOENT".into()));
        assert!(attempt.result.is_settled());
    }

    #[test]
    fn result_serializes_with_state_tag() {
        let json = serde_json::to_string(&StrategyResult::Failed("boom".into())).unwrap();
        assert_eq!(json, r#"{"state":"failed","reason":"boom"}"#);
        let json = serde_json::to_string(&StrategyResult::Succeeded).unwrap();
        assert_eq!(json, r#"{"state":"succeeded"}"#);
    }
}
