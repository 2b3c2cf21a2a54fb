//! Text exposition encoder (format 0.0.4).
//!
//! Every metric emitted here is its own family: one `# HELP`, one `# TYPE`,
//! one sample line. A metric is rendered into a scratch buffer first so a
//! failed write never leaves half a family in the output.

use std::fmt::Write;

use mgomonitor_core::error::{MonitorError, Result};
use mgomonitor_core::Metric;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// HELP text escapes backslash and newline only.
pub fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// Append one metric family to `out`.
pub fn encode_metric(m: &Metric, out: &mut String) -> Result<()> {
    let mut buf = String::new();
    write_family(m, &mut buf)
        .map_err(|e| MonitorError::Encode(format!("{}: {e}", m.desc().fq_name())))?;
    out.push_str(&buf);
    Ok(())
}

fn write_family(m: &Metric, out: &mut String) -> std::fmt::Result {
    let desc = m.desc();
    let name = desc.fq_name();
    writeln!(out, "# HELP {} {}", name, escape_help(desc.help()))?;
    writeln!(out, "# TYPE {} {}", name, m.metric_type().as_str())?;

    let label_str = desc
        .labels()
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    if label_str.is_empty() {
        writeln!(out, "{} {}", name, format_value(m.value()))
    } else {
        writeln!(out, "{}{{{}}} {}", name, label_str, format_value(m.value()))
    }
}
