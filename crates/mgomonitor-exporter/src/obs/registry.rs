use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use mgomonitor_core::error::{MonitorError, Result};
use mgomonitor_core::{Collector, Desc};

use super::encode;

/// Result of one scrape: the rendered body plus every per-metric failure.
#[derive(Debug, Default)]
pub struct Gathered {
    pub text: String,
    pub errors: Vec<MonitorError>,
}

impl Gathered {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Registry of collectors, polled uniformly through the `Collector` trait.
#[derive(Default)]
pub struct Registry {
    next_id: AtomicUsize,
    collectors: DashMap<usize, Arc<dyn Collector>>,
    /// fq_name -> (owning collector id, described descriptor)
    names: DashMap<String, (usize, Desc)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe `c` once and claim its metric names.
    ///
    /// Nothing is registered if any descriptor is invalid or already taken.
    pub fn register(&self, c: Arc<dyn Collector>) -> Result<()> {
        let descs = c.describe();
        if descs.is_empty() {
            return Err(MonitorError::InvalidDesc("collector describes no metrics".into()));
        }
        for d in &descs {
            d.validate()?;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut claimed: Vec<String> = Vec::with_capacity(descs.len());
        for d in descs {
            let name = d.fq_name().to_string();
            // The entry guard holds the shard lock; release it before rolling back.
            let taken = match self.names.entry(name.clone()) {
                Entry::Occupied(_) => true,
                Entry::Vacant(v) => {
                    v.insert((id, d));
                    false
                }
            };
            if taken {
                for n in claimed {
                    self.names.remove(&n);
                }
                return Err(MonitorError::AlreadyRegistered(name));
            }
            claimed.push(name);
        }

        tracing::info!(collector_id = id, metrics = claimed.len(), "collector registered");
        self.collectors.insert(id, c);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Registered metric names, sorted.
    pub fn registered_names(&self) -> Vec<String> {
        let mut v: Vec<String> = self.names.iter().map(|e| e.key().clone()).collect();
        v.sort();
        v
    }

    /// Collect from every collector in registration order and render.
    ///
    /// Each metric is checked and encoded on its own; a bad one is reported
    /// in `errors` and the rest of the batch is still written.
    pub fn gather(&self) -> Gathered {
        let mut entries: Vec<(usize, Arc<dyn Collector>)> = self
            .collectors
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        entries.sort_by_key(|(id, _)| *id);

        let mut out = Gathered::default();
        let mut seen: HashSet<String> = HashSet::new();

        for (id, c) in entries {
            for m in c.collect() {
                let name = m.desc().fq_name();
                let checked = match self.names.get(name) {
                    Some(r) if r.0 == id && &r.1 == m.desc() => Ok(()),
                    Some(r) if r.0 != id => Err(MonitorError::InconsistentCollector(format!(
                        "{name} is described by another collector"
                    ))),
                    Some(_) => Err(MonitorError::InconsistentCollector(format!(
                        "{name} does not match its registered descriptor"
                    ))),
                    None => Err(MonitorError::InconsistentCollector(format!(
                        "{name} was collected but not described"
                    ))),
                };
                let res = checked
                    .and_then(|()| {
                        if seen.insert(name.to_string()) {
                            Ok(())
                        } else {
                            Err(MonitorError::InconsistentCollector(format!(
                                "{name} collected more than once"
                            )))
                        }
                    })
                    .and_then(|()| encode::encode_metric(&m, &mut out.text));

                if let Err(e) = res {
                    tracing::warn!(collector_id = id, code = e.code(), error = %e, "metric skipped");
                    out.errors.push(e);
                }
            }
        }
        out
    }
}
