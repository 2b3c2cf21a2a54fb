//! mgomonitor exporter
//!
//! - Loads strict YAML config (path from argv[1], default `mgomonitor.yaml`)
//! - Registers the driver stats collector under the configured prefix
//! - Serves `/metrics`, `/healthz`, `/readyz`; drains on Ctrl-C

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use mgomonitor_core::error::{MonitorError, Result};
use mgomonitor_exporter::{app_state, config, ops, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code(), error = %e, "mgomonitor-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "mgomonitor.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .exporter
        .listen
        .parse()
        .map_err(|e| MonitorError::Config(format!("exporter.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "mgomonitor-exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MonitorError::Internal(format!("failed to bind: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(ops::drain_on(state, tokio::signal::ctrl_c()))
        .await
        .map_err(|e| MonitorError::Internal(format!("server failed: {e}")))
}
