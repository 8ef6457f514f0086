//! Main CLI parser and service options.

use clap::{Args, Parser};
use std::path::PathBuf;

use magplay_core::{DEFAULT_BUFFER_KB, DEFAULT_META_TITLE};

use crate::commands::Commands;

/// Default probe timeout on the command line, in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(name = "magplay")]
#[command(about = "Open magnet links from the browser in a streaming tool or media player")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Loopback port to listen on [default: 48888]
    #[arg(long, env = "PORT", global = true)]
    pub port: Option<String>,

    /// Playback mode: `peerflix` (stream first, fall back to the player) or `vlc` (player only)
    #[arg(long, env = "MODE", global = true)]
    pub mode: Option<String>,

    /// Player executable
    #[arg(long = "player-path", env = "VLC_PATH", global = true)]
    pub player_path: Option<PathBuf>,

    /// Streaming tool to run in stream mode
    #[arg(long = "stream-tool", default_value = "peerflix", global = true)]
    pub stream_tool: String,

    /// Stream buffer handed to the streaming tool, in KB
    #[arg(long = "buffer-kb", default_value_t = DEFAULT_BUFFER_KB, global = true)]
    pub buffer_kb: u32,

    /// Title shown by the player
    #[arg(long = "meta-title", default_value = DEFAULT_META_TITLE, global = true)]
    pub meta_title: String,

    /// Upper bound for each tool lookup command, in milliseconds
    #[arg(
        long = "probe-timeout-ms",
        env = "MAGPLAY_PROBE_TIMEOUT_MS",
        default_value_t = DEFAULT_PROBE_TIMEOUT_MS,
        global = true
    )]
    pub probe_timeout_ms: u64,

    /// Remember located tools for this many seconds (off when unset)
    #[arg(long = "cache-ttl-secs", env = "MAGPLAY_CACHE_TTL_SECS", global = true)]
    pub cache_ttl_secs: Option<u64>,
}
