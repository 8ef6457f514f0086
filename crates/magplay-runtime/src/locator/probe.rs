//! Bounded external command probes.
//!
//! Every probe (`peerflix --version`, `npm root -g`, ...) goes through
//! [`CommandProbe`] so the locator and diagnostics can be exercised against
//! a scripted probe in tests.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Why a probe produced no usable output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The program could not be started at all (usually: not on the search path).
    #[error("could not run '{program}': {reason}")]
    Spawn { program: String, reason: String },

    /// The program ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: String },

    /// The program did not finish in time and was killed.
    #[error("'{program}' did not answer within {}ms", .after.as_millis())]
    TimedOut { program: String, after: Duration },
}

/// Runs a short-lived command and returns its first line of output.
#[async_trait]
pub trait CommandProbe: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError>;
}

/// Production probe backed by `tokio::process` with a per-call timeout.
#[derive(Debug, Clone)]
pub struct SystemCommandProbe {
    timeout: Duration,
}

impl SystemCommandProbe {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandProbe for SystemCommandProbe {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, ProbeError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A probe that outlives its timeout is abandoned; make sure it dies with the future.
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| ProbeError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::TimedOut {
                program: program.to_string(),
                after: self.timeout,
            })?
            .map_err(|e| ProbeError::Spawn {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: program.to_string(),
                status: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Try stdout first, fall back to stderr (some tools print versions there)
        let text = if stdout.trim().is_empty() {
            stderr
        } else {
            stdout
        };

        let first_line = text.lines().next().unwrap_or_default().trim().to_string();
        debug!(program, ?args, output = %first_line, "probe succeeded");
        Ok(first_line)
    }
}
