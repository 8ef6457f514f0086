//! Configuration assembly - the CLI's composition step.
//!
//! Flags and environment variables are validated here, once, before
//! anything is bound or spawned.

use std::time::Duration;

use magplay_core::{PlaybackMode, ServiceConfig};

use crate::error::CliError;
use crate::parser::ServiceArgs;

/// Build the service configuration from parsed arguments.
///
/// Empty `PORT` / `MODE` / `VLC_PATH` values fall back to the defaults;
/// an unparseable port or unrecognised mode is an error.
pub fn service_config(args: &ServiceArgs) -> Result<ServiceConfig, CliError> {
    let mut config = ServiceConfig::with_defaults();

    if let Some(port) = args.port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        let port = port
            .parse::<u16>()
            .map_err(|e| CliError::Config(format!("invalid port '{port}': {e}")))?;
        config = config.with_port(port);
    }

    if let Some(mode) = args.mode.as_deref().filter(|m| !m.trim().is_empty()) {
        config = config.with_mode(mode.parse::<PlaybackMode>()?);
    }

    if let Some(path) = args
        .player_path
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        config = config.with_player_path(path.clone());
    }

    if args.stream_tool.trim().is_empty() {
        return Err(CliError::Config("stream tool name must not be empty".into()));
    }
    config.stream.tool = args.stream_tool.clone();

    if args.buffer_kb == 0 {
        return Err(CliError::Config("buffer size must be at least 1 KB".into()));
    }
    config.stream.buffer_kb = args.buffer_kb;
    config.meta_title = args.meta_title.clone();

    if args.probe_timeout_ms == 0 {
        return Err(CliError::Config("probe timeout must be positive".into()));
    }
    config.probe_timeout = Duration::from_millis(args.probe_timeout_ms);

    if let Some(secs) = args.cache_ttl_secs.filter(|s| *s > 0) {
        config = config.with_cache_ttl(Duration::from_secs(secs));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    fn args(argv: &[&str]) -> ServiceArgs {
        let mut full = vec!["magplay"];
        full.extend_from_slice(argv);
        Cli::parse_from(full).service
    }

    #[test]
    fn explicit_flags_reach_the_config() {
        let config = service_config(&args(&[
            "--port",
            "50001",
            "--mode",
            "VLC",
            "--player-path",
            "/opt/vlc/bin/vlc",
            "--buffer-kb",
            "2048",
            "--meta-title",
            "Magnet",
            "--probe-timeout-ms",
            "250",
            "--cache-ttl-secs",
            "30",
        ]))
        .unwrap();

        assert_eq!(config.port, 50001);
        assert_eq!(config.mode, PlaybackMode::DirectOnly);
        assert_eq!(config.player_path, PathBuf::from("/opt/vlc/bin/vlc"));
        assert_eq!(config.stream.buffer_kb, 2048);
        assert_eq!(config.meta_title, "Magnet");
        assert_eq!(config.probe_timeout, Duration::from_millis(250));
        assert_eq!(config.cache_ttl, Some(Duration::from_secs(30)));
    }

    #[test]
    fn stream_mode_aliases_are_accepted() {
        for mode in ["peerflix", "stream", "stream-first"] {
            let config = service_config(&args(&["--mode", mode])).unwrap();
            assert_eq!(config.mode, PlaybackMode::StreamFirst, "{mode}");
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = service_config(&args(&["--mode", "mpv"])).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("mpv"));
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        let config = service_config(&args(&["--port", ""])).unwrap();
        assert_eq!(config.port, magplay_core::DEFAULT_PORT);
    }

    #[test]
    fn unparseable_port_is_a_configuration_error() {
        for port in ["http", "70000"] {
            let err = service_config(&args(&["--port", port])).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "{port}");
        }
    }

    #[test]
    fn zero_cache_ttl_disables_the_cache() {
        let config = service_config(&args(&["--cache-ttl-secs", "0"])).unwrap();
        assert_eq!(config.cache_ttl, None);
    }

    #[test]
    fn zero_buffer_is_rejected() {
        assert!(service_config(&args(&["--buffer-kb", "0"])).is_err());
    }
}
