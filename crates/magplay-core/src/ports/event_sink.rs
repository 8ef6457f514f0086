//! Launch event sink port.

use crate::events::LaunchEvent;

/// Receives launch lifecycle events.
pub trait LaunchEventSink: Send + Sync {
    fn emit(&self, event: LaunchEvent);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl LaunchEventSink for NoopEventSink {
    fn emit(&self, _event: LaunchEvent) {}
}
