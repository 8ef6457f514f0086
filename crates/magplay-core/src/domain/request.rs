//! Inbound playback request.

use serde::{Deserialize, Serialize};

use crate::ports::ValidationError;

/// Scheme prefix every accepted link must start with.
pub const MAGNET_PREFIX: &str = "magnet:?";

/// Number of link characters kept when a link is written to the log.
const PREVIEW_CHARS: usize = 50;

/// A validated playback request.
///
/// Built per HTTP request and dropped once the launch chain has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    link: String,
}

impl PlaybackRequest {
    /// Validate a raw `link` query value.
    ///
    /// A missing or empty value is [`ValidationError::MissingLink`]; a value
    /// without the magnet prefix is [`ValidationError::InvalidLink`].
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let link = match raw {
            Some(link) if !link.is_empty() => link,
            _ => return Err(ValidationError::MissingLink),
        };

        if !link.starts_with(MAGNET_PREFIX) {
            return Err(ValidationError::InvalidLink);
        }

        Ok(Self {
            link: link.to_string(),
        })
    }

    /// The full link.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// First characters of the link, for log lines.
    pub fn preview(&self) -> String {
        if self.link.chars().count() <= PREVIEW_CHARS {
            return self.link.clone();
        }
        let head: String = self.link.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}
