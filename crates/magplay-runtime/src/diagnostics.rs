//! Startup diagnostics for playback tools.
//!
//! Probes each strategy's executable once and reports what was found. The
//! report is informational only; the launch chain re-resolves on every
//! request regardless of what it says.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use magplay_core::{Invocation, PlaybackMode, ServiceConfig, StrategyKind};

use crate::locator::{CommandProbe, ExecutableLocator};

/// Resolution state of one strategy's executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ToolStatus {
    Resolved { invocation: Invocation },
    Missing { reason: String },
}

impl ToolStatus {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Diagnostic entry for one strategy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDiagnostic {
    pub strategy: StrategyKind,
    pub tool: String,
    /// Whether the configured mode will ever try this strategy.
    pub active: bool,
    pub status: ToolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
}

/// Snapshot of tool availability.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub mode: PlaybackMode,
    pub player_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_root_error: Option<String>,
    pub tools: Vec<ToolDiagnostic>,
}

impl DiagnosticsReport {
    /// Entry for a given strategy.
    pub fn tool(&self, strategy: StrategyKind) -> Option<&ToolDiagnostic> {
        self.tools.iter().find(|t| t.strategy == strategy)
    }

    /// Whether at least one strategy the mode uses has a resolvable tool.
    pub fn has_playable_strategy(&self) -> bool {
        self.tools.iter().any(|t| t.active && t.status.is_resolved())
    }

    /// Write the report to the log.
    pub fn log(&self) {
        info!("Checking playback tool installation...");
        match (&self.package_root, &self.package_root_error) {
            (Some(root), _) => info!(root = %root.display(), "Package manager global root"),
            (None, Some(e)) => warn!(error = %e, "Could not query package manager global root"),
            (None, None) => {}
        }

        for tool in &self.tools {
            let active = if tool.active { "active" } else { "inactive" };
            match &tool.status {
                ToolStatus::Resolved { invocation } => info!(
                    strategy = %tool.strategy,
                    %active,
                    %invocation,
                    version = tool.version.as_deref().unwrap_or("unknown"),
                    "Tool found"
                ),
                ToolStatus::Missing { reason } => {
                    warn!(strategy = %tool.strategy, %active, %reason, "Tool not found");
                }
            }
        }

        let stream_missing = self
            .tool(StrategyKind::AlternateBufferedStream)
            .is_some_and(|t| t.active && !t.status.is_resolved())
            && self
                .tool(StrategyKind::BufferedStream)
                .is_some_and(|t| !t.status.is_resolved());
        if stream_missing {
            if let Some(stream) = self.tool(StrategyKind::BufferedStream) {
                warn!("Try reinstalling: npm install -g {}", stream.tool);
            }
        }

        if !self.has_playable_strategy() {
            warn!("No playback tool is currently resolvable; requests will fail until one is installed");
        }
    }
}

/// Probe every strategy's executable.
pub async fn probe_installation(config: &ServiceConfig, probe: Arc<dyn CommandProbe>) -> DiagnosticsReport {
    let stream = &config.stream;
    let locator = ExecutableLocator::new(Arc::clone(&probe), stream);
    let stream_active = config.mode == PlaybackMode::StreamFirst;

    let (package_root, package_root_error) = match locator.package_root().await {
        Ok(root) => (Some(root), None),
        Err(e) => (None, Some(e)),
    };

    // Package-root entry script, with its version when it answers.
    let entry = match &package_root {
        Some(root) => {
            let path = locator.entry_path(root, &stream.tool);
            if is_file(&path).await {
                let script = path.to_string_lossy().to_string();
                let version = probe
                    .run(locator.interpreter(), &[script.as_str(), "--version"])
                    .await
                    .ok();
                Ok((path, version))
            } else {
                Err(format!("{} does not exist", path.display()))
            }
        }
        None => Err(package_root_error
            .clone()
            .unwrap_or_else(|| "package root unknown".to_string())),
    };

    let alternate = match &entry {
        Ok((path, version)) => ToolDiagnostic {
            strategy: StrategyKind::AlternateBufferedStream,
            tool: stream.tool.clone(),
            active: stream_active,
            status: ToolStatus::Resolved {
                invocation: Invocation::interpreted(locator.interpreter(), path),
            },
            version: version.clone(),
            location: Some(path.clone()),
        },
        Err(reason) => missing(StrategyKind::AlternateBufferedStream, &stream.tool, stream_active, reason),
    };

    let primary = match probe.run(&stream.tool, &["--version"]).await {
        Ok(version) => ToolDiagnostic {
            strategy: StrategyKind::BufferedStream,
            tool: stream.tool.clone(),
            active: stream_active,
            status: ToolStatus::Resolved {
                invocation: Invocation::direct(&stream.tool),
            },
            version: Some(version),
            location: which::which(&stream.tool).ok(),
        },
        Err(path_err) => ToolDiagnostic {
            strategy: StrategyKind::BufferedStream,
            active: stream_active,
            ..match &entry {
                // Primary falls back to the package root, so it is still resolvable.
                Ok(_) => alternate.clone(),
                Err(root_err) => missing(
                    StrategyKind::BufferedStream,
                    &stream.tool,
                    stream_active,
                    &format!("not in system PATH ({path_err}); {root_err}"),
                ),
            }
        },
    };

    let player_name = config.player_path.to_string_lossy().to_string();
    let direct = match which::which(&config.player_path) {
        Ok(location) => ToolDiagnostic {
            strategy: StrategyKind::DirectPlayer,
            tool: player_name.clone(),
            active: true,
            status: ToolStatus::Resolved {
                invocation: Invocation::direct(player_name),
            },
            version: None,
            location: Some(location),
        },
        Err(e) => missing(
            StrategyKind::DirectPlayer,
            &player_name,
            true,
            &format!("{e}; make sure the player is installed at {player_name}"),
        ),
    };

    DiagnosticsReport {
        mode: config.mode,
        player_path: config.player_path.clone(),
        package_root,
        package_root_error,
        tools: vec![primary, alternate, direct],
    }
}

fn missing(strategy: StrategyKind, tool: &str, active: bool, reason: &str) -> ToolDiagnostic {
    ToolDiagnostic {
        strategy,
        tool: tool.to_string(),
        active,
        status: ToolStatus::Missing {
            reason: reason.to_string(),
        },
        version: None,
        location: None,
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ProbeError;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    /// Probe that knows a package root and optionally a search-path tool.
    struct FakeProbe {
        root: Option<String>,
        on_path: bool,
    }

    #[async_trait]
    impl CommandProbe for FakeProbe {
        async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
            let not_found = || ProbeError::Spawn {
                program: program.to_string(),
                reason: "No such file or directory".into(),
            };
            match (program, args) {
                ("npm", ["root", "-g"]) => self.root.clone().ok_or_else(not_found),
                ("peerflix", ["--version"]) if self.on_path => Ok("0.39.0".into()),
                ("node", [_, "--version"]) => Ok("0.39.0".into()),
                _ => Err(not_found()),
            }
        }
    }

    fn config(mode: PlaybackMode) -> ServiceConfig {
        let mut config = ServiceConfig::with_defaults()
            .with_mode(mode)
            .with_player_path("definitely_not_a_real_player_12345");
        config.stream.package_manager = "npm".into();
        config
    }

    fn root_with_entry() -> TempDir {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("peerflix")).unwrap();
        fs::write(root.path().join("peerflix/app.js"), "").unwrap();
        root
    }

    #[tokio::test]
    async fn package_install_resolves_both_stream_forms() {
        let root = root_with_entry();
        let probe = Arc::new(FakeProbe {
            root: Some(root.path().to_string_lossy().to_string()),
            on_path: false,
        });

        let report = probe_installation(&config(PlaybackMode::StreamFirst), probe).await;

        assert_eq!(report.package_root.as_deref(), Some(root.path()));
        let primary = report.tool(StrategyKind::BufferedStream).unwrap();
        let alternate = report.tool(StrategyKind::AlternateBufferedStream).unwrap();
        assert_eq!(primary.strategy, StrategyKind::BufferedStream);
        assert!(primary.status.is_resolved());
        assert!(alternate.status.is_resolved());
        assert_eq!(alternate.version.as_deref(), Some("0.39.0"));
        assert!(report.has_playable_strategy());
    }

    #[tokio::test]
    async fn search_path_install_without_package_root() {
        let probe = Arc::new(FakeProbe {
            root: None,
            on_path: true,
        });

        let report = probe_installation(&config(PlaybackMode::StreamFirst), probe).await;

        assert!(report.package_root_error.is_some());
        let primary = report.tool(StrategyKind::BufferedStream).unwrap();
        assert_eq!(
            primary.status,
            ToolStatus::Resolved {
                invocation: Invocation::direct("peerflix")
            }
        );
        assert!(!report
            .tool(StrategyKind::AlternateBufferedStream)
            .unwrap()
            .status
            .is_resolved());
    }

    #[tokio::test]
    async fn nothing_installed_reports_every_strategy_missing() {
        let probe = Arc::new(FakeProbe {
            root: None,
            on_path: false,
        });

        let report = probe_installation(&config(PlaybackMode::DirectOnly), probe).await;

        assert_eq!(report.tools.len(), 3);
        assert!(report.tools.iter().all(|t| !t.status.is_resolved()));
        assert!(!report.tool(StrategyKind::BufferedStream).unwrap().active);
        assert!(report.tool(StrategyKind::DirectPlayer).unwrap().active);
        assert!(!report.has_playable_strategy());
        report.log();
    }
}
