//! Scrape endpoint tests driven through the router with `oneshot()`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use mgomonitor_core::StatsSnapshot;
use mgomonitor_exporter::app_state::AppState;
use mgomonitor_exporter::{config, ops, router};

const CFG: &str = r#"
version: 1
exporter:
  metrics_path: "/probe/metrics"
collector:
  prefix: "test"
"#;

fn known() -> StatsSnapshot {
    StatsSnapshot {
        clusters: 2,
        master_conns: 1,
        slave_conns: 3,
        sent_ops: 100,
        received_ops: 98,
        received_docs: 50,
        sockets_alive: 4,
        sockets_in_use: 2,
        socket_refs: 6,
    }
}

fn state_with(current: Arc<Mutex<StatsSnapshot>>) -> AppState {
    let cfg = config::load_from_str(CFG).unwrap();
    AppState::with_source(cfg, Arc::new(move || *current.lock().unwrap())).unwrap()
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Option<String>, String) {
    let app = router::build_router(state.clone());
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let ctype = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, ctype, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn metrics_body_lists_catalog_in_order() {
    let state = state_with(Arc::new(Mutex::new(known())));
    let (status, ctype, body) = get(&state, "/probe/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("text/plain; version=0.0.4; charset=utf-8"));

    let samples: Vec<&str> = body.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(
        samples,
        vec![
            "test_mgo_clusters 2",
            "test_mgo_master_connections 1",
            "test_mgo_slave_connections 3",
            "test_mgo_sent_operations 100",
            "test_mgo_received_operations 98",
            "test_mgo_received_documents 50",
            "test_mgo_sockets_alive 4",
            "test_mgo_sockets_in_use 2",
            "test_mgo_socket_references 6",
        ]
    );
    assert!(body.contains("# HELP test_mgo_sockets_in_use Number of in use sockets.\n"));
    assert!(body.contains("# TYPE test_mgo_socket_references gauge\n"));
}

#[tokio::test]
async fn each_scrape_reflects_current_snapshot() {
    let current = Arc::new(Mutex::new(known()));
    let state = state_with(Arc::clone(&current));

    let (_, _, first) = get(&state, "/probe/metrics").await;
    current.lock().unwrap().clusters = 7;
    let (_, _, second) = get(&state, "/probe/metrics").await;

    assert!(first.contains("test_mgo_clusters 2\n"));
    assert!(second.contains("test_mgo_clusters 7\n"));
}

#[tokio::test]
async fn default_metrics_path_not_routed_when_overridden() {
    let state = state_with(Arc::new(Mutex::new(known())));
    let (status, _, _) = get(&state, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_readiness() {
    let state = state_with(Arc::new(Mutex::new(StatsSnapshot::default())));

    let (status, _, body) = get(&state, "/healthz").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));

    let (status, _, body) = get(&state, "/readyz").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ready"));

    state.set_draining();
    let (status, _, body) = get(&state, "/readyz").await;
    assert_eq!((status, body.as_str()), (StatusCode::SERVICE_UNAVAILABLE, "draining"));
}

#[tokio::test]
async fn drain_on_signal_marks_draining() {
    let state = state_with(Arc::new(Mutex::new(StatsSnapshot::default())));
    ops::drain_on(state.clone(), async { Ok(()) }).await;

    assert!(state.is_draining());
    let (status, _, _) = get(&state, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn failed_signal_handler_keeps_serving() {
    let state = state_with(Arc::new(Mutex::new(StatsSnapshot::default())));
    let failing = async { Err(io::Error::new(io::ErrorKind::Other, "no signal handler")) };

    let waited = tokio::time::timeout(Duration::from_millis(50), ops::drain_on(state.clone(), failing)).await;

    assert!(waited.is_err(), "shutdown future must stay pending");
    assert!(!state.is_draining());
    let (status, _, body) = get(&state, "/readyz").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ready"));
}
