//! Tool locator port.

use async_trait::async_trait;

use super::ResolutionError;
use crate::domain::Invocation;

/// Turns a logical tool name into a runnable [`Invocation`].
#[async_trait]
pub trait ToolLocator: Send + Sync {
    /// Resolve `tool` from the search path, falling back to the package
    /// manager's global module root.
    async fn locate(&self, tool: &str) -> Result<Invocation, ResolutionError>;

    /// Resolve `tool` from the global module root only, as an interpreter
    /// plus entry script.
    async fn locate_in_package_root(&self, tool: &str) -> Result<Invocation, ResolutionError>;

    /// Forget anything remembered about `tool`. Called after a launch of
    /// a located invocation failed.
    fn invalidate(&self, _tool: &str) {}
}
