//! Shared application state for the exporter.
//!
//! Owns the collector registry and the draining flag read by `/readyz`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mgomonitor_core::error::Result;
use mgomonitor_core::stats::{self, GlobalStats, StatsSource};
use mgomonitor_core::StatsCollector;

use crate::config::ExporterConfig;
use crate::obs::Registry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Registry,
    draining: AtomicBool,
}

impl AppState {
    /// Build state over the process-wide driver stats.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        stats::global().set_enabled(cfg.collector.stats_enabled);
        Self::with_source(cfg, Arc::new(GlobalStats))
    }

    /// Build state over an explicit stats source.
    pub fn with_source(cfg: ExporterConfig, source: Arc<dyn StatsSource>) -> Result<Self> {
        let registry = Registry::new();
        registry.register(Arc::new(StatsCollector::with_source(&cfg.collector.prefix, source)))?;

        tracing::info!(
            prefix = %cfg.collector.prefix,
            metrics = registry.registered_names().len(),
            "stats collector ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
