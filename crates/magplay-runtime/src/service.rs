//! Fire-and-forget playback dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tracing::{debug, error};

use magplay_core::{CoreError, LaunchEvent, LaunchEventSink, PlaybackDispatcher, PlaybackRequest};

use crate::strategy::LaunchChain;

/// [`PlaybackDispatcher`] that runs the launch chain on the current tokio
/// runtime and returns before any strategy has been tried.
///
/// Requests are independent: a new one never cancels one already running.
pub struct PlaybackService {
    chain: Arc<LaunchChain>,
    events: Arc<dyn LaunchEventSink>,
    next_id: AtomicU64,
    on_chain_panic: Option<PanicHandler>,
}

/// Called with the request id of a chain run that panicked.
pub type PanicHandler = Arc<dyn Fn(u64) + Send + Sync>;

impl PlaybackService {
    pub fn new(chain: Arc<LaunchChain>, events: Arc<dyn LaunchEventSink>) -> Self {
        Self {
            chain,
            events,
            next_id: AtomicU64::new(1),
            on_chain_panic: None,
        }
    }

    /// Run `handler` when a chain task panics. Without one the panic is
    /// only logged.
    #[must_use]
    pub fn on_chain_panic(mut self, handler: PanicHandler) -> Self {
        self.on_chain_panic = Some(handler);
        self
    }
}

impl PlaybackDispatcher for PlaybackService {
    fn dispatch(&self, request: PlaybackRequest) -> Result<u64, CoreError> {
        if self.chain.is_empty() {
            return Err(CoreError::Configuration(
                "no playback strategies configured".to_string(),
            ));
        }

        let handle = Handle::try_current()
            .map_err(|e| CoreError::Internal(format!("no async runtime to launch on: {e}")))?;

        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.events
            .emit(LaunchEvent::dispatched(request_id, request.preview()));

        let chain = Arc::clone(&self.chain);
        let task = handle.spawn(async move {
            let report = chain.run(request_id, &request).await;
            debug!(request_id, tried = ?report.tried(), "launch chain finished");
        });

        let on_panic = self.on_chain_panic.clone();
        handle.spawn(async move {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!(request_id, "Launch chain panicked");
                    if let Some(handler) = on_panic {
                        handler(request_id);
                    }
                }
            }
        });

        Ok(request_id)
    }
}
