//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining)
//! - `/metrics` : Prometheus text format (path configurable)

use std::future::Future;
use std::io;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::obs::encode::CONTENT_TYPE;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

/// Serve whatever could be encoded; per-metric failures are logged only.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let gathered = state.registry().gather();
    if !gathered.is_ok() {
        tracing::warn!(errors = gathered.errors.len(), "scrape served with skipped metrics");
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], gathered.text).into_response()
}

/// Resolve once `signal` fires, marking the state as draining first.
///
/// If the signal handler cannot be installed this never resolves, so the
/// server keeps running instead of shutting down right after startup.
pub async fn drain_on<F>(state: AppState, signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            state.set_draining();
            tracing::info!("shutdown requested, draining");
        }
        Err(e) => {
            tracing::error!(error = %e, "shutdown signal unavailable, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}
