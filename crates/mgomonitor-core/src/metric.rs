//! Metric descriptors, emitted values, and the collector contract.

use crate::error::{MonitorError, Result};

/// Kind of an emitted metric. Only gauges are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricType {
    Gauge,
}

impl MetricType {
    /// Name used on the `# TYPE` line of the text exposition format.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
        }
    }
}

/// Immutable metric metadata: fully-qualified name, help text, const labels.
///
/// Two descriptors are equal iff name, help and labels all match. Labels are
/// kept sorted by key so equality does not depend on construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Desc {
    fq_name: String,
    help: String,
    labels: Vec<(String, String)>,
}

impl Desc {
    /// Build a descriptor. Never fails; see [`Desc::validate`].
    pub fn new(fq_name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            help: help.into(),
            labels: Vec::new(),
        }
    }

    /// Attach const labels.
    pub fn with_labels(mut self, labels: &[(&str, &str)]) -> Self {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.labels = key;
        self
    }

    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn labels(&self) -> &[(String, String)] {
        &self.labels
    }

    /// Check metric and label names against the exposition grammar.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_metric_name(&self.fq_name) {
            return Err(MonitorError::InvalidDesc(format!(
                "{:?} is not a valid metric name",
                self.fq_name
            )));
        }
        let mut prev: Option<&str> = None;
        for (k, _) in &self.labels {
            if !is_valid_label_name(k) {
                return Err(MonitorError::InvalidDesc(format!(
                    "{:?} is not a valid label name (metric {})",
                    k, self.fq_name
                )));
            }
            if prev == Some(k.as_str()) {
                return Err(MonitorError::InvalidDesc(format!(
                    "duplicate label {:?} (metric {})",
                    k, self.fq_name
                )));
            }
            prev = Some(k.as_str());
        }
        Ok(())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, reserved `__` prefix rejected.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// One emitted value tagged with its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    desc: Desc,
    metric_type: MetricType,
    value: f64,
}

impl Metric {
    /// Constant gauge sample.
    pub fn gauge(desc: Desc, value: f64) -> Self {
        Self {
            desc,
            metric_type: MetricType::Gauge,
            value,
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Something a scrape framework can register and poll.
///
/// `describe` is called once at registration; `collect` on every scrape. Both
/// must enumerate the same descriptors in the same order.
pub trait Collector: Send + Sync {
    fn describe(&self) -> Vec<Desc>;
    fn collect(&self) -> Vec<Metric>;
}
