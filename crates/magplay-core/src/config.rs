//! Service configuration.
//!
//! `ServiceConfig` is assembled once at startup (by the CLI from flags and
//! environment) and shared read-only with the strategy chain and the HTTP
//! dispatcher. Nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ports::CoreError;

/// Default loopback port for the HTTP endpoint.
pub const DEFAULT_PORT: u16 = 48888;

/// Default stream buffer size handed to the streaming tool, in kilobytes.
pub const DEFAULT_BUFFER_KB: u32 = 1024;

/// Default window title passed to the player.
pub const DEFAULT_META_TITLE: &str = "Jackett";

/// Default upper bound for a single locator probe (`tool --version`, `npm root -g`).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Which strategies the launch chain is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Buffered stream first, then its alternate form, then the direct player.
    #[default]
    StreamFirst,
    /// Only the direct player.
    DirectOnly,
}

impl PlaybackMode {
    /// Stable name used in logs and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StreamFirst => "stream-first",
            Self::DirectOnly => "direct-only",
        }
    }
}

impl fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaybackMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "peerflix" | "stream" | "stream-first" => Ok(Self::StreamFirst),
            "vlc" | "direct" | "direct-only" => Ok(Self::DirectOnly),
            other => Err(CoreError::Configuration(format!(
                "unknown playback mode '{other}' (expected 'peerflix' or 'vlc')"
            ))),
        }
    }
}

/// How to find and drive the buffered-stream tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamToolConfig {
    /// Logical tool name, probed on the search path and used as the
    /// package directory name under the global module root.
    pub tool: String,
    /// Buffer size passed as `--buffer=<kb>`.
    pub buffer_kb: u32,
    /// Package manager queried for its global module root.
    pub package_manager: String,
    /// Interpreter that runs the tool's entry script.
    pub interpreter: String,
    /// Entry script file name inside the tool's package directory.
    pub entry_file: String,
}

impl Default for StreamToolConfig {
    fn default() -> Self {
        Self {
            tool: "peerflix".to_string(),
            buffer_kb: DEFAULT_BUFFER_KB,
            package_manager: default_package_manager().to_string(),
            interpreter: "node".to_string(),
            entry_file: "app.js".to_string(),
        }
    }
}

/// Process-wide service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Loopback port for the HTTP endpoint.
    pub port: u16,
    /// Strategy mode.
    pub mode: PlaybackMode,
    /// Path (or bare command name) of the direct player executable.
    pub player_path: PathBuf,
    /// Buffered-stream tool settings.
    pub stream: StreamToolConfig,
    /// Title the player shows for the stream.
    pub meta_title: String,
    /// Upper bound for a single locator probe.
    pub probe_timeout: Duration,
    /// Lifetime of memoised tool invocations; `None` disables the cache.
    pub cache_ttl: Option<Duration>,
}

impl ServiceConfig {
    /// Create config with defaults for the current platform.
    pub fn with_defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            mode: PlaybackMode::default(),
            player_path: default_player_path(),
            stream: StreamToolConfig::default(),
            meta_title: DEFAULT_META_TITLE.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            cache_ttl: None,
        }
    }

    /// Set the listening port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the playback mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: PlaybackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the direct player path.
    #[must_use]
    pub fn with_player_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.player_path = path.into();
        self
    }

    /// Enable the invocation cache with the given lifetime.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Default direct player location for the current OS.
pub fn default_player_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        PathBuf::from("vlc.exe")
    }

    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Applications/VLC.app/Contents/MacOS/VLC")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        PathBuf::from("vlc")
    }
}

/// npm ships as a batch shim on Windows, which `CreateProcess` will not find by bare name.
const fn default_package_manager() -> &'static str {
    if cfg!(windows) { "npm.cmd" } else { "npm" }
}
