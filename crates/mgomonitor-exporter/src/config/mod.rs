//! Exporter config loader (strict parsing).
//!
//! Unknown keys are rejected at every level, and the collector prefix is
//! checked against the metric-name grammar before anything is registered.

pub mod schema;

use std::fs;

use mgomonitor_core::error::{MonitorError, Result};

pub use schema::{CollectorSection, ExporterConfig, ExporterSection};

/// Read and validate a YAML config file. Read failures map to `Internal`.
pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MonitorError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Parse YAML, then run [`ExporterConfig::validate`]: version must be 1,
/// `metrics_path` absolute, `collector.prefix` a valid name prefix.
pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| MonitorError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
