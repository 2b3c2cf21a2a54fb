//! Top-level facade crate for mgomonitor.
//!
//! Re-exports the collector core and the exporter library so users can depend on a single crate.
//! A driver bumps `core::stats::global()`; a [`StatsCollector`] built over it is what a scrape
//! registry polls.

pub mod core {
    pub use mgomonitor_core::*;
}

pub mod exporter {
    pub use mgomonitor_exporter::*;
}

pub use mgomonitor_core::{Collector, StatsCollector};
