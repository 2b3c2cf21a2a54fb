use serde::Deserialize;

use mgomonitor_core::error::{MonitorError, Result};
use mgomonitor_core::metric::is_valid_metric_name;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    pub collector: CollectorSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MonitorError::UnsupportedVersion);
        }
        self.exporter.validate()?;
        self.collector.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') {
            return Err(MonitorError::Config(
                "exporter.metrics_path must start with '/'".into(),
            ));
        }
        if matches!(self.metrics_path.as_str(), "/healthz" | "/readyz") {
            return Err(MonitorError::Config(format!(
                "exporter.metrics_path collides with {}",
                self.metrics_path
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9216".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    pub prefix: String,

    #[serde(default = "default_stats_enabled")]
    pub stats_enabled: bool,
}

impl CollectorSection {
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(MonitorError::Config("collector.prefix must not be empty".into()));
        }
        // Names are `<prefix>_mgo_<suffix>`; the prefix decides validity.
        if !is_valid_metric_name(&format!("{}_mgo", self.prefix)) {
            return Err(MonitorError::Config(format!(
                "collector.prefix {:?} is not a valid metric name prefix",
                self.prefix
            )));
        }
        Ok(())
    }
}

fn default_stats_enabled() -> bool {
    true
}
