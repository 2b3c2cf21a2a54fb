//! Driver connection-pool and I/O counters.
//!
//! [`DriverStats`] is the counter block a database driver bumps as clusters,
//! connections and sockets come and go. One process-wide instance lives
//! behind [`global`]. Readers only ever see it through [`StatsSource`], which
//! lets tests substitute a fixed snapshot.
//!
//! Fields are independent atomics. A snapshot reads them one after another,
//! so values taken while the driver is busy may be slightly skewed relative
//! to each other. Recorders share `gate` with the toggle and reset paths, so
//! no increment lands after counting has been switched off.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Point-in-time read of the driver counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub clusters: i64,
    pub master_conns: i64,
    pub slave_conns: i64,
    pub sent_ops: i64,
    pub received_ops: i64,
    pub received_docs: i64,
    pub sockets_alive: i64,
    pub sockets_in_use: i64,
    pub socket_refs: i64,
}

/// Anything that can hand out the current counters. Reads never fail; an
/// uninitialized source returns zeros.
pub trait StatsSource: Send + Sync {
    fn snapshot(&self) -> StatsSnapshot;
}

impl<F> StatsSource for F
where
    F: Fn() -> StatsSnapshot + Send + Sync,
{
    fn snapshot(&self) -> StatsSnapshot {
        self()
    }
}

/// Live counter block. Starts disabled; recorders are no-ops until
/// [`DriverStats::set_enabled`] turns counting on.
#[derive(Debug, Default)]
pub struct DriverStats {
    /// Shared by recorders, exclusive for `set_enabled` and `reset`.
    gate: RwLock<()>,
    enabled: AtomicBool,
    clusters: AtomicI64,
    master_conns: AtomicI64,
    slave_conns: AtomicI64,
    sent_ops: AtomicI64,
    received_ops: AtomicI64,
    received_docs: AtomicI64,
    sockets_alive: AtomicI64,
    sockets_in_use: AtomicI64,
    socket_refs: AtomicI64,
}

static GLOBAL: DriverStats = DriverStats::new();

/// Process-wide counter block.
pub fn global() -> &'static DriverStats {
    &GLOBAL
}

impl DriverStats {
    pub const fn new() -> Self {
        Self {
            gate: RwLock::new(()),
            enabled: AtomicBool::new(false),
            clusters: AtomicI64::new(0),
            master_conns: AtomicI64::new(0),
            slave_conns: AtomicI64::new(0),
            sent_ops: AtomicI64::new(0),
            received_ops: AtomicI64::new(0),
            received_docs: AtomicI64::new(0),
            sockets_alive: AtomicI64::new(0),
            sockets_in_use: AtomicI64::new(0),
            socket_refs: AtomicI64::new(0),
        }
    }

    /// Turn counting on or off. Turning it off also zeroes every counter.
    pub fn set_enabled(&self, enabled: bool) {
        tracing::debug!(enabled, "driver stats toggled");
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        if !enabled {
            self.enabled.store(false, Ordering::Relaxed);
            for c in self.all() {
                c.store(0, Ordering::Relaxed);
            }
            return;
        }
        self.enabled.store(true, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Zero the cumulative counters. Clusters and socket counts describe
    /// live objects and are kept.
    pub fn reset(&self) {
        tracing::debug!("resetting driver stats");
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        for c in [
            &self.master_conns,
            &self.slave_conns,
            &self.sent_ops,
            &self.received_ops,
            &self.received_docs,
        ] {
            c.store(0, Ordering::Relaxed);
        }
    }

    pub fn add_clusters(&self, delta: i64) {
        self.add(&self.clusters, delta);
    }

    /// Connection opened (`delta > 0`) or closed, to a master or a slave.
    pub fn add_conns(&self, delta: i64, master: bool) {
        if master {
            self.add(&self.master_conns, delta);
        } else {
            self.add(&self.slave_conns, delta);
        }
    }

    pub fn add_sent_ops(&self, delta: i64) {
        self.add(&self.sent_ops, delta);
    }

    pub fn add_received_ops(&self, delta: i64) {
        self.add(&self.received_ops, delta);
    }

    pub fn add_received_docs(&self, delta: i64) {
        self.add(&self.received_docs, delta);
    }

    pub fn add_sockets_alive(&self, delta: i64) {
        self.add(&self.sockets_alive, delta);
    }

    pub fn add_sockets_in_use(&self, delta: i64) {
        self.add(&self.sockets_in_use, delta);
    }

    pub fn add_socket_refs(&self, delta: i64) {
        self.add(&self.socket_refs, delta);
    }

    fn add(&self, counter: &AtomicI64, delta: i64) {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        if self.is_enabled() {
            counter.fetch_add(delta, Ordering::Relaxed);
        }
    }

    fn all(&self) -> [&AtomicI64; 9] {
        [
            &self.clusters,
            &self.master_conns,
            &self.slave_conns,
            &self.sent_ops,
            &self.received_ops,
            &self.received_docs,
            &self.sockets_alive,
            &self.sockets_in_use,
            &self.socket_refs,
        ]
    }
}

impl StatsSource for DriverStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            clusters: self.clusters.load(Ordering::Relaxed),
            master_conns: self.master_conns.load(Ordering::Relaxed),
            slave_conns: self.slave_conns.load(Ordering::Relaxed),
            sent_ops: self.sent_ops.load(Ordering::Relaxed),
            received_ops: self.received_ops.load(Ordering::Relaxed),
            received_docs: self.received_docs.load(Ordering::Relaxed),
            sockets_alive: self.sockets_alive.load(Ordering::Relaxed),
            sockets_in_use: self.sockets_in_use.load(Ordering::Relaxed),
            socket_refs: self.socket_refs.load(Ordering::Relaxed),
        }
    }
}

/// Handle onto the process-wide [`DriverStats`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalStats;

impl StatsSource for GlobalStats {
    fn snapshot(&self) -> StatsSnapshot {
        global().snapshot()
    }
}
