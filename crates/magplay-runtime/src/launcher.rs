//! Detached process launching.
//!
//! The player must outlive this service and must not hold any of our
//! stdio open, so children get null stdio and their own process group.
//! Once the OS has accepted the spawn the handle is dropped; tokio reaps
//! the child in the background when it eventually exits.

use async_trait::async_trait;
use std::process::Stdio;
use tracing::{debug, info};

use magplay_core::{Invocation, LaunchError, ProcessLauncher, SpawnAck};

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Launch-and-abandon process starter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl DetachedLauncher {
    pub const fn new() -> Self {
        Self
    }

    /// Build the OS command for `invocation` followed by `args`.
    pub fn command(invocation: &Invocation, args: &[String]) -> std::process::Command {
        let mut cmd = std::process::Command::new(&invocation.command);
        cmd.args(invocation.argv(args))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group: a Ctrl+C aimed at this service must not reach the player.
            cmd.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
        }

        cmd
    }
}

#[async_trait]
impl ProcessLauncher for DetachedLauncher {
    async fn launch(&self, invocation: &Invocation, args: &[String]) -> Result<SpawnAck, LaunchError> {
        let mut cmd = tokio::process::Command::from(Self::command(invocation, args));
        cmd.kill_on_drop(false);

        debug!(command = %invocation, ?args, "spawning detached process");

        let child = cmd.spawn().map_err(|e| LaunchError::Spawn {
            command: invocation.command.clone(),
            reason: e.to_string(),
        })?;

        let pid = child.id();
        drop(child);

        info!(command = %invocation.command, ?pid, "process spawned");
        Ok(SpawnAck {
            pid,
            command: invocation.command.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_appends_args_after_prefix() {
        let invocation = Invocation::interpreted("node", std::path::Path::new("/opt/peerflix/app.js"));
        let cmd = DetachedLauncher::command(&invocation, &["magnet:?xt=1".to_string(), "--vlc".to_string()]);

        assert_eq!(cmd.get_program(), "node");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["/opt/peerflix/app.js", "magnet:?xt=1", "--vlc"]);
    }

    #[tokio::test]
    async fn missing_executable_is_a_launch_error() {
        let err = DetachedLauncher::new()
            .launch(&Invocation::direct("definitely_not_a_real_player_12345"), &[])
            .await
            .unwrap_err();

        let LaunchError::Spawn { command, .. } = err;
        assert_eq!(command, "definitely_not_a_real_player_12345");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn existing_executable_is_acknowledged_with_pid() {
        let ack = DetachedLauncher::new()
            .launch(&Invocation::direct("true"), &[])
            .await
            .unwrap();

        assert_eq!(ack.command, "true");
        assert!(ack.pid.is_some());
    }
}
