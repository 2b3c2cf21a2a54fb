//! Collector registry and Prometheus text exposition.
//!
//! Collectors are registered once (their catalog is checked then) and polled
//! on every scrape. Rendering is dependency-free: descriptors and samples are
//! written straight into a `String` in text format 0.0.4.

pub mod encode;
pub mod registry;

pub use registry::{Gathered, Registry};
