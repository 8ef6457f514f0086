//! Launch event broadcasting.
//!
//! Every event is written to the log and fanned out to any subscribers.
//! With no subscribers the broadcast step is skipped.

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use magplay_core::{LaunchEvent, LaunchEventSink};

/// Broadcast channel capacity for launch events
const CHANNEL_CAPACITY: usize = 64;

/// Logs launch events and broadcasts them to subscribers.
pub struct LaunchEventBroadcaster {
    sender: broadcast::Sender<LaunchEvent>,
}

impl LaunchEventBroadcaster {
    /// Create a new broadcaster
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to launch events
    pub fn subscribe(&self) -> broadcast::Receiver<LaunchEvent> {
        self.sender.subscribe()
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn log(event: &LaunchEvent) {
        match event {
            LaunchEvent::Dispatched {
                request_id, link, ..
            } => info!(request_id, %link, "Starting playback"),
            LaunchEvent::ResolutionFailed {
                request_id,
                strategy,
                reason,
                ..
            } => warn!(request_id, %strategy, %reason, "Could not locate tool, trying next strategy"),
            LaunchEvent::LaunchFailed {
                request_id,
                strategy,
                reason,
                ..
            } => error!(request_id, %strategy, %reason, "Launch failed"),
            LaunchEvent::Spawned {
                request_id,
                strategy,
                command,
                pid,
                ..
            } => info!(request_id, %strategy, %command, ?pid, "Playback started successfully"),
            LaunchEvent::Exhausted {
                request_id,
                last_error,
                ..
            } => error!(request_id, %last_error, "All playback strategies failed"),
        }
    }
}

impl Default for LaunchEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchEventSink for LaunchEventBroadcaster {
    fn emit(&self, event: LaunchEvent) {
        Self::log(&event);
        if self.sender.receiver_count() > 0 {
            debug!(?event, "Broadcasting launch event");
            let _ = self.sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magplay_core::StrategyKind;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let broadcaster = LaunchEventBroadcaster::new();
        let mut rx = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 1);

        broadcaster.emit(LaunchEvent::spawned(3, StrategyKind::DirectPlayer, "vlc", Some(1)));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.request_id(), 3);
        assert!(event.is_terminal());
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        let broadcaster = LaunchEventBroadcaster::default();
        broadcaster.emit(LaunchEvent::exhausted(1, "nothing to launch"));
        assert_eq!(broadcaster.subscriber_count(), 0);
    }
}
