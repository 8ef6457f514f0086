//! Two-tier tool resolution.
//!
//! Globally installed tools show up either as a shim on the search path or
//! only inside the package manager's module tree, depending on platform and
//! installer. Neither can be assumed, so both are probed:
//!
//! 1. `<tool> --version` on the ambient search path
//! 2. `<package manager> root -g`, then `<root>/<tool>/<entry file>`

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use magplay_core::{Invocation, ResolutionError, StreamToolConfig, ToolLocator};

use super::probe::CommandProbe;

/// Locator backed by real command probes and the real filesystem.
pub struct ExecutableLocator {
    probe: Arc<dyn CommandProbe>,
    package_manager: String,
    interpreter: String,
    entry_file: String,
}

impl ExecutableLocator {
    pub fn new(probe: Arc<dyn CommandProbe>, settings: &StreamToolConfig) -> Self {
        Self {
            probe,
            package_manager: settings.package_manager.clone(),
            interpreter: settings.interpreter.clone(),
            entry_file: settings.entry_file.clone(),
        }
    }

    /// Ask the package manager for its global module root.
    pub async fn package_root(&self) -> Result<PathBuf, String> {
        let root = self
            .probe
            .run(&self.package_manager, &["root", "-g"])
            .await
            .map_err(|e| e.to_string())?;

        if root.is_empty() {
            return Err(format!("'{} root -g' printed nothing", self.package_manager));
        }
        Ok(PathBuf::from(root))
    }

    /// Entry script location for `tool` under `root`.
    pub fn entry_path(&self, root: &std::path::Path, tool: &str) -> PathBuf {
        root.join(tool).join(&self.entry_file)
    }

    /// Interpreter used for package-root invocations.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

#[async_trait]
impl ToolLocator for ExecutableLocator {
    async fn locate(&self, tool: &str) -> Result<Invocation, ResolutionError> {
        match self.probe.run(tool, &["--version"]).await {
            Ok(version) => {
                info!(tool, %version, "Using tool from system PATH");
                return Ok(Invocation::direct(tool));
            }
            Err(e) => debug!(tool, error = %e, "tool not runnable from PATH"),
        }

        self.locate_in_package_root(tool).await
    }

    async fn locate_in_package_root(&self, tool: &str) -> Result<Invocation, ResolutionError> {
        let root = self
            .package_root()
            .await
            .map_err(|e| ResolutionError::not_found(tool, e))?;
        let entry = self.entry_path(&root, tool);

        let is_file = tokio::fs::metadata(&entry)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ResolutionError::not_found(
                tool,
                format!("{} does not exist", entry.display()),
            ));
        }

        info!(tool, entry = %entry.display(), "Using tool from global package root");
        Ok(Invocation::interpreted(self.interpreter.clone(), &entry))
    }
}
