//! Driver stats collector.
//!
//! Republishes the nine driver counters as unlabeled gauges named
//! `<prefix>_mgo_<suffix>`. Descriptors are built once at construction and
//! never change, so `describe` and `collect` can run on any number of threads
//! at once without coordination.

use std::fmt;
use std::sync::Arc;

use crate::metric::{Collector, Desc, Metric};
use crate::stats::{GlobalStats, StatsSnapshot, StatsSource};

/// Catalog order. `describe` and `collect` both walk this table.
const CATALOG: [(&str, &str, fn(&StatsSnapshot) -> i64); 9] = [
    ("clusters", "Number of alive clusters.", |s| s.clusters),
    ("master_connections", "Number of master connections.", |s| s.master_conns),
    ("slave_connections", "Number of slave connections.", |s| s.slave_conns),
    ("sent_operations", "Number of operations sent.", |s| s.sent_ops),
    ("received_operations", "Number of operations received.", |s| s.received_ops),
    ("received_documents", "Number of documents received.", |s| s.received_docs),
    ("sockets_alive", "Number of alive sockets.", |s| s.sockets_alive),
    ("sockets_in_use", "Number of in use sockets.", |s| s.sockets_in_use),
    ("socket_references", "Number of references to sockets.", |s| s.socket_refs),
];

/// Publishes the driver counters as nine `<prefix>_mgo_*` gauges.
pub struct StatsCollector {
    descs: [Desc; 9],
    source: Arc<dyn StatsSource>,
}

impl StatsCollector {
    /// Collector over the process-wide driver stats.
    pub fn new(prefix: &str) -> Self {
        Self::with_source(prefix, Arc::new(GlobalStats))
    }

    /// Collector over `source`, which is read exactly once per `collect`.
    pub fn with_source(prefix: &str, source: Arc<dyn StatsSource>) -> Self {
        let descs = CATALOG.map(|(suffix, help, _)| Desc::new(format!("{prefix}_mgo_{suffix}"), help));
        Self { descs, source }
    }
}

impl fmt::Debug for StatsCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsCollector")
            .field("descs", &self.descs)
            .finish_non_exhaustive()
    }
}

impl Collector for StatsCollector {
    fn describe(&self) -> Vec<Desc> {
        self.descs.to_vec()
    }

    fn collect(&self) -> Vec<Metric> {
        let snap = self.source.snapshot();
        self.descs
            .iter()
            .zip(CATALOG.iter())
            .map(|(desc, (_, _, field))| Metric::gauge(desc.clone(), field(&snap) as f64))
            .collect()
    }
}
