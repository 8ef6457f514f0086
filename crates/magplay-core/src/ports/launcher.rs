//! Process launcher port.

use async_trait::async_trait;

use super::LaunchError;
use crate::domain::{Invocation, SpawnAck};

/// Starts a detached process and forgets about it.
///
/// Implementations must not keep the child's stdio open and must not wait
/// for it to exit. `Ok` only means the OS accepted the spawn.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    async fn launch(&self, invocation: &Invocation, args: &[String]) -> Result<SpawnAck, LaunchError>;
}
