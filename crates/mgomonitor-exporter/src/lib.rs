//! mgomonitor exporter library entry.
//!
//! Registers the driver stats collector and serves it over HTTP for a
//! Prometheus scraper. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
