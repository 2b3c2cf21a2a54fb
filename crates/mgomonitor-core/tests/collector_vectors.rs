//! StatsCollector catalog and snapshot tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use mgomonitor_core::{Collector, Desc, MetricType, StatsCollector, StatsSnapshot};


fn expected_descs(prefix: &str) -> Vec<Desc> {
    [
        ("clusters", "Number of alive clusters."),
        ("master_connections", "Number of master connections."),
        ("slave_connections", "Number of slave connections."),
        ("sent_operations", "Number of operations sent."),
        ("received_operations", "Number of operations received."),
        ("received_documents", "Number of documents received."),
        ("sockets_alive", "Number of alive sockets."),
        ("sockets_in_use", "Number of in use sockets."),
        ("socket_references", "Number of references to sockets."),
    ]
    .iter()
    .map(|(suffix, help)| Desc::new(format!("{prefix}_mgo_{suffix}"), *help))
    .collect()
}

fn fixed(snap: StatsSnapshot) -> StatsCollector {
    StatsCollector::with_source("test", Arc::new(move || snap))
}

#[test]
fn describe_matches_catalog() {
    let c = fixed(StatsSnapshot::default());
    assert_eq!(c.describe(), expected_descs("test"));
}

#[test]
fn describe_is_parameterized_by_prefix() {
    for prefix in ["juju", "a", "ns:sub"] {
        let c = StatsCollector::with_source(prefix, Arc::new(StatsSnapshot::default));
        assert_eq!(c.describe(), expected_descs(prefix));
    }
}

#[test]
fn collect_known_snapshot() {
    let v = vector_loader::load("snapshot_known.json");
    let snap = v.snapshot;
    let c = StatsCollector::with_source(&v.prefix, Arc::new(move || snap));
    let metrics = c.collect();
    let descs = c.describe();

    assert_eq!(metrics.len(), 9);
    for (i, m) in metrics.iter().enumerate() {
        assert_eq!(m.desc(), &descs[i], "metric {i}");
        assert_eq!(m.metric_type(), MetricType::Gauge);
        assert_eq!(m.value(), v.expect[i], "metric {}", m.desc().fq_name());
    }
}

#[test]
fn collect_uninitialized_source_is_all_zero() {
    let v = vector_loader::load("snapshot_zero.json");
    let snap = v.snapshot;
    let c = StatsCollector::with_source(&v.prefix, Arc::new(move || snap));
    let values: Vec<f64> = c.collect().iter().map(|m| m.value()).collect();
    assert_eq!(values, v.expect);
    assert_eq!(c.describe()[0].fq_name(), "juju_mgo_clusters");
}

#[test]
fn each_collect_reads_a_fresh_snapshot() {
    let current = Arc::new(Mutex::new(StatsSnapshot { clusters: 1, ..Default::default() }));
    let reads = Arc::new(AtomicUsize::new(0));
    let src = {
        let current = Arc::clone(&current);
        let reads = Arc::clone(&reads);
        move || {
            reads.fetch_add(1, Ordering::SeqCst);
            *current.lock().unwrap()
        }
    };
    let c = StatsCollector::with_source("test", Arc::new(src));

    let first = c.collect();
    *current.lock().unwrap() = StatsSnapshot { clusters: 5, sent_ops: 7, ..Default::default() };
    let second = c.collect();

    assert_eq!(reads.load(Ordering::SeqCst), 2);
    assert_eq!(first[0].value(), 1.0);
    assert_eq!(first[3].value(), 0.0);
    assert_eq!(second[0].value(), 5.0);
    assert_eq!(second[3].value(), 7.0);
}

#[test]
fn collect_does_not_touch_describe() {
    let c = fixed(StatsSnapshot { socket_refs: 3, ..Default::default() });
    let before = c.describe();
    let _ = c.collect();
    let _ = c.collect();
    assert_eq!(c.describe(), before);
}

#[test]
fn usable_as_trait_object() {
    let collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(fixed(StatsSnapshot::default())),
        Box::new(StatsCollector::with_source("other", Arc::new(StatsSnapshot::default))),
    ];
    let total: usize = collectors.iter().map(|c| c.collect().len()).sum();
    assert_eq!(total, 18);
}

#[test]
fn concurrent_describe_and_collect() {
    let snap = StatsSnapshot {
        clusters: 2,
        master_conns: 1,
        slave_conns: 3,
        sent_ops: 100,
        received_ops: 98,
        received_docs: 50,
        sockets_alive: 4,
        sockets_in_use: 2,
        socket_refs: 6,
    };
    let c = Arc::new(fixed(snap));
    let want = expected_descs("test");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let c = Arc::clone(&c);
            let want = want.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    if i % 2 == 0 {
                        assert_eq!(c.describe(), want);
                    } else {
                        let got: Vec<Desc> = c.collect().into_iter().map(|m| m.desc().clone()).collect();
                        assert_eq!(got, want);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
