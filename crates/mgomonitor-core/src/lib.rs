//! mgomonitor core: metric descriptors, the collector contract, and the driver
//! stats source the collector republishes.
//!
//! This crate carries no transport or runtime dependencies. The exporter
//! crate owns registration, text exposition and the HTTP scrape endpoint.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `MonitorError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collector;
pub mod error;
pub mod metric;
pub mod stats;

pub use collector::StatsCollector;
/// Shared result type.
pub use error::{MonitorError, Result};
pub use metric::{Collector, Desc, Metric, MetricType};
pub use stats::{global, DriverStats, GlobalStats, StatsSnapshot, StatsSource};
