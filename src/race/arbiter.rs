//! Race arbiter
//!
//! Resolves one request by racing a cache probe against a store probe.
//! Both probes always finish with a terminal outcome and both are always
//! awaited before `resolve` returns, whichever source wins.

use crate::cache::SharedCache;
use crate::error::{RaceError, RaceResult};
use crate::race::trace::{ResultSink, Trace};
use crate::race::types::{LookupRequest, Origin, ProbeOutcome, Resolution};
use crate::record::RecordKey;
use crate::store::BackingStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

type Probe = JoinHandle<RaceResult<ProbeOutcome>>;

/// Counters shared by every resolution of an arbiter
#[derive(Debug, Default)]
pub struct ProbeStats {
    probes_completed: AtomicUsize,
    cache_wins: AtomicUsize,
    store_wins: AtomicUsize,
    misses: AtomicUsize,
}

impl ProbeStats {
    /// Probes that ran to completion, winners and losers alike
    pub fn completed_probes(&self) -> usize {
        self.probes_completed.load(Ordering::Acquire)
    }

    /// Requests answered by the cache
    pub fn cache_wins(&self) -> usize {
        self.cache_wins.load(Ordering::Relaxed)
    }

    /// Requests answered by the store
    pub fn store_wins(&self) -> usize {
        self.store_wins.load(Ordering::Relaxed)
    }

    /// Requests neither source could answer
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    fn probe_done(&self) {
        self.probes_completed.fetch_add(1, Ordering::Release);
    }

    fn record(&self, resolution: &Resolution) {
        let counter = match resolution.origin() {
            Some(Origin::Cache) => &self.cache_wins,
            Some(Origin::Store) => &self.store_wins,
            None => &self.misses,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Races the shared cache against a backing store
#[derive(Clone)]
pub struct Arbiter {
    cache: SharedCache,
    store: Arc<dyn BackingStore>,
    stats: Arc<ProbeStats>,
}

impl Arbiter {
    /// Create an arbiter over `cache` and `store`
    ///
    /// The store is expected to populate the same cache on hits.
    pub fn new(cache: SharedCache, store: Arc<dyn BackingStore>) -> Self {
        Self {
            cache,
            store,
            stats: Arc::new(ProbeStats::default()),
        }
    }

    /// Counters for all resolutions run through this arbiter
    pub fn stats(&self) -> &ProbeStats {
        &self.stats
    }

    /// The cache probed by this arbiter
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Resolve one request, emitting its trace to `sink` as soon as a
    /// winner is known
    ///
    /// Returns only after both probes have completed.
    pub async fn resolve(
        &self,
        request: LookupRequest,
        sink: &dyn ResultSink,
    ) -> RaceResult<Resolution> {
        let key = request.key;
        let mut cache_probe = self.spawn_cache_probe(key);
        let mut store_probe = self.spawn_store_probe(key);

        // Unbiased: when both are ready the winner is arbitrary, which is
        // fine because a cache entry always equals the store record.
        let (first_origin, first) = tokio::select! {
            joined = &mut cache_probe => (Origin::Cache, joined),
            joined = &mut store_probe => (Origin::Store, joined),
        };
        let first = settle(key, first_origin, first);

        let second_origin = first_origin.other();
        let second_probe = match second_origin {
            Origin::Cache => &mut cache_probe,
            Origin::Store => &mut store_probe,
        };

        if let Ok(ProbeOutcome::Found(record)) = first {
            let resolution = Resolution::Found {
                origin: first_origin,
                record,
            };
            self.report(&request, &resolution, sink);

            match settle(key, second_origin, second_probe.await) {
                Ok(_) => debug!("Discarded {} outcome for key {}", second_origin, key),
                Err(e) => warn!("Discarded failed {} probe for key {}: {}", second_origin, key, e),
            }
            return Ok(resolution);
        }

        let second = settle(key, second_origin, second_probe.await);
        let resolution = match (first, second) {
            (first, Ok(ProbeOutcome::Found(record))) => {
                if let Err(e) = first {
                    warn!("Discarded failed {} probe for key {}: {}", first_origin, key, e);
                }
                Resolution::Found {
                    origin: second_origin,
                    record,
                }
            }
            (Ok(ProbeOutcome::NotFound), Ok(ProbeOutcome::NotFound)) => Resolution::NotFound,
            (Err(e), _) | (_, Err(e)) => return Err(e),
            (Ok(ProbeOutcome::Found(_)), _) => {
                return Err(RaceError::Internal(format!(
                    "winning {} outcome for key {} was not reported",
                    first_origin, key
                )))
            }
        };

        self.report(&request, &resolution, sink);
        Ok(resolution)
    }

    fn spawn_cache_probe(&self, key: RecordKey) -> Probe {
        let cache = self.cache.clone();
        let stats = Arc::clone(&self.stats);
        tokio::spawn(async move {
            let outcome = ProbeOutcome::from(cache.get(key));
            debug!("Cache probe for key {} finished: {:?}", key, outcome);
            stats.probe_done();
            Ok(outcome)
        })
    }

    fn spawn_store_probe(&self, key: RecordKey) -> Probe {
        let store = Arc::clone(&self.store);
        let stats = Arc::clone(&self.stats);
        tokio::spawn(async move {
            let outcome = store.lookup(key).await.map(ProbeOutcome::from);
            debug!("Store probe ({}) for key {} finished", store.name(), key);
            stats.probe_done();
            outcome
        })
    }

    fn report(&self, request: &LookupRequest, resolution: &Resolution, sink: &dyn ResultSink) {
        self.stats.record(resolution);
        match resolution {
            Resolution::Found { origin, record } => {
                info!("Key {} resolved from {}: {}", request.key, origin, record)
            }
            Resolution::NotFound => info!("Key {} not found in cache or store", request.key),
        }
        sink.emit(&Trace::new(request, resolution));
    }
}

/// Flatten a joined probe into its outcome
fn settle(
    key: RecordKey,
    origin: Origin,
    joined: Result<RaceResult<ProbeOutcome>, JoinError>,
) -> RaceResult<ProbeOutcome> {
    joined.map_err(|e| RaceError::ProbeFailed {
        key,
        reason: format!("{} probe: {}", origin, e),
    })?
}
