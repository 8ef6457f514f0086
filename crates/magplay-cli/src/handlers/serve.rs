//! Serve command handler.
//!
//! Binds the loopback endpoint, reports tool availability in the
//! background, and runs until Ctrl+C.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use magplay_core::ServiceConfig;
use magplay_runtime::{SystemCommandProbe, probe_installation};

/// Execute the serve command.
pub async fn execute(config: ServiceConfig) -> Result<()> {
    info!(
        mode = %config.mode,
        player = %config.player_path.display(),
        stream_tool = %config.stream.tool,
        "Starting magplay"
    );

    let diagnostics_config = config.clone();
    let on_ready = move |addr: SocketAddr| {
        info!("Ready to receive playback requests");
        info!("Test with: curl http://{addr}/ping");
        info!("Press Ctrl+C to stop");

        tokio::spawn(async move {
            let probe = Arc::new(SystemCommandProbe::new(diagnostics_config.probe_timeout));
            probe_installation(&diagnostics_config, probe).await.log();
        });
    };

    magplay_axum::start_server(config, shutdown_signal(), on_ready).await?;

    info!("Service stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => {
            warn!(error = %e, "Could not listen for Ctrl+C; stop the process another way");
            std::future::pending::<()>().await;
        }
    }
}
