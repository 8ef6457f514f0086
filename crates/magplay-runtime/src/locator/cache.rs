//! Short-lived memoisation of resolved invocations.
//!
//! Resolving a tool costs one or two subprocess round trips per request.
//! `CachingLocator` keeps successful `locate` results for a fixed TTL and
//! drops an entry as soon as a launch of it fails.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use magplay_core::{Invocation, ResolutionError, ToolLocator};

struct CachedInvocation {
    invocation: Invocation,
    resolved_at: Instant,
}

/// [`ToolLocator`] decorator with a per-tool TTL cache.
///
/// Only the two-tier `locate` form is cached; `locate_in_package_root`
/// always goes to the inner locator since it is the retry path.
pub struct CachingLocator {
    inner: Arc<dyn ToolLocator>,
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedInvocation>>,
}

impl CachingLocator {
    pub fn new(inner: Arc<dyn ToolLocator>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, tool: &str) -> Option<Invocation> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(tool) {
            Some(entry) if entry.resolved_at.elapsed() < self.ttl => Some(entry.invocation.clone()),
            Some(_) => {
                entries.remove(tool);
                None
            }
            None => None,
        }
    }
}

#[async_trait]
impl ToolLocator for CachingLocator {
    async fn locate(&self, tool: &str) -> Result<Invocation, ResolutionError> {
        if let Some(invocation) = self.cached(tool) {
            debug!(tool, %invocation, "using cached invocation");
            return Ok(invocation);
        }

        let invocation = self.inner.locate(tool).await?;
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                tool.to_string(),
                CachedInvocation {
                    invocation: invocation.clone(),
                    resolved_at: Instant::now(),
                },
            );
        }
        Ok(invocation)
    }

    async fn locate_in_package_root(&self, tool: &str) -> Result<Invocation, ResolutionError> {
        self.inner.locate_in_package_root(tool).await
    }

    fn invalidate(&self, tool: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(tool).is_some() {
                debug!(tool, "dropped cached invocation");
            }
        }
        self.inner.invalidate(tool);
    }
}
