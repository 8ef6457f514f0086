//! Axum server bootstrap - the composition root.
//!
//! This is the only place where the locator, launcher, strategy chain and
//! playback service are wired together for the HTTP adapter.

use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use magplay_core::{PlaybackDispatcher, ProcessLauncher, ServiceConfig, ToolLocator};
use magplay_runtime::{
    CachingLocator, DetachedLauncher, ExecutableLocator, LaunchChain, LaunchEventBroadcaster,
    PlaybackService, SystemCommandProbe,
};

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Receives validated playback requests.
    pub dispatcher: Arc<dyn PlaybackDispatcher>,
    /// Launch lifecycle events for every dispatched request.
    pub events: Arc<LaunchEventBroadcaster>,
    /// The configuration the context was built from.
    pub config: Arc<ServiceConfig>,
}

impl AxumContext {
    /// Context around an already-built dispatcher and the broadcaster it
    /// emits into.
    pub fn new(
        dispatcher: Arc<dyn PlaybackDispatcher>,
        events: Arc<LaunchEventBroadcaster>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            dispatcher,
            events,
            config: Arc::new(config),
        }
    }
}

/// Build the playback stack for `config`.
pub fn bootstrap(config: &ServiceConfig) -> AxumContext {
    let probe = Arc::new(SystemCommandProbe::new(config.probe_timeout));
    let executable_locator: Arc<dyn ToolLocator> =
        Arc::new(ExecutableLocator::new(probe, &config.stream));

    let locator: Arc<dyn ToolLocator> = match config.cache_ttl {
        Some(ttl) => {
            info!(ttl_secs = ttl.as_secs(), "Tool invocation cache enabled");
            Arc::new(CachingLocator::new(executable_locator, ttl))
        }
        None => executable_locator,
    };

    let launcher: Arc<dyn ProcessLauncher> = Arc::new(DetachedLauncher::new());
    let events = Arc::new(LaunchEventBroadcaster::new());

    let chain = Arc::new(LaunchChain::for_mode(
        config,
        locator,
        launcher,
        events.clone(),
    ));
    info!(mode = %config.mode, strategies = ?chain.kinds(), "Launch chain ready");

    let service =
        PlaybackService::new(chain, events.clone()).on_chain_panic(Arc::new(exit_on_chain_panic));

    AxumContext::new(Arc::new(service), events, config.clone())
}

/// A panicking launch is a bug; stop the process instead of serving on.
fn exit_on_chain_panic(request_id: u64) {
    error!(request_id, "Exiting after launch chain panic");
    std::process::exit(1);
}

/// Loopback address the service listens on.
pub fn bind_address(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, port))
}

/// Serve the playback endpoint until `shutdown` resolves.
///
/// Binding happens before `on_ready` runs, so anything it starts can
/// assume the port is taken.
pub async fn start_server<S, R>(config: ServiceConfig, shutdown: S, on_ready: R) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    R: FnOnce(SocketAddr),
{
    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx);

    let addr = bind_address(config.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    info!("magplay listening on http://{local}");
    on_ready(local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
