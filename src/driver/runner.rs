//! Paced lookup runner with a completion barrier

use crate::driver::keys::KeyGenerator;
use crate::error::{RaceError, RaceResult};
use crate::race::{Arbiter, LookupRequest, Origin, Resolution, ResultSink};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Totals for one driver run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Requests issued
    pub requests: usize,

    /// Requests answered by the cache
    pub cache_hits: usize,

    /// Requests answered by the store
    pub store_hits: usize,

    /// Requests neither source could answer
    pub misses: usize,

    /// Requests that ended in an error
    pub failures: usize,

    /// Probes that ran to completion during this run
    pub probes_completed: usize,

    /// Cache size once every request finished
    pub cached_entries: usize,

    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl RunSummary {
    fn tally(&mut self, resolution: &Resolution) {
        match resolution.origin() {
            Some(Origin::Cache) => self.cache_hits += 1,
            Some(Origin::Store) => self.store_hits += 1,
            None => self.misses += 1,
        }
    }
}

/// Drives a sequence of lookups through one arbiter
pub struct Driver {
    arbiter: Arbiter,
    sink: Arc<dyn ResultSink>,
}

impl Driver {
    /// Create a driver reporting every resolution to `sink`
    pub fn new(arbiter: Arbiter, sink: Arc<dyn ResultSink>) -> Self {
        Self { arbiter, sink }
    }

    /// The arbiter resolving this driver's requests
    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    /// Issue `count` lookups, `pace` apart, and wait for all of them
    ///
    /// Resolutions overlap whenever `pace` is shorter than the store
    /// latency. Every spawned resolution is joined even after a failure;
    /// the first error is returned once the barrier is reached.
    pub async fn run(
        &self,
        count: usize,
        keys: &mut dyn KeyGenerator,
        pace: Duration,
    ) -> RaceResult<RunSummary> {
        let start = Instant::now();
        let probes_before = self.arbiter.stats().completed_probes();
        let mut tasks = JoinSet::new();

        for i in 0..count {
            let request = LookupRequest::new(keys.next_key());
            debug!("Issuing request {} for key {}", request.id, request.key);

            let arbiter = self.arbiter.clone();
            let sink = Arc::clone(&self.sink);
            tasks.spawn(async move { arbiter.resolve(request, sink.as_ref()).await });

            if i + 1 < count {
                tokio::time::sleep(pace).await;
            }
        }

        let mut summary = RunSummary {
            requests: count,
            ..RunSummary::default()
        };
        let mut first_error = None;

        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .map_err(|e| RaceError::Internal(format!("lookup task failed: {}", e)))
                .and_then(|resolved| resolved);

            match result {
                Ok(resolution) => summary.tally(&resolution),
                Err(e) => {
                    warn!("Lookup failed: {}", e);
                    summary.failures += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        summary.probes_completed = self.arbiter.stats().completed_probes() - probes_before;
        summary.cached_entries = self.arbiter.cache().len();
        summary.elapsed_ms = start.elapsed().as_millis() as u64;

        info!(
            "Run finished: {} requests, {} from cache, {} from store, {} missing",
            summary.requests, summary.cache_hits, summary.store_hits, summary.misses
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SharedCache;
    use crate::driver::keys::{FixedKeys, RandomKeys};
    use crate::race::MemorySink;
    use crate::record::{Record, RecordKey};
    use crate::store::{BackingStore, Dataset, StoreAdapter};
    use async_trait::async_trait;
    use tokio::time::timeout;

    const GUARD: Duration = Duration::from_secs(10);

    fn driver(latency_ms: u64) -> (Driver, Arc<MemorySink>) {
        let cache = SharedCache::new();
        let store = StoreAdapter::new(
            Dataset::builtin(),
            cache.clone(),
            Duration::from_millis(latency_ms),
        );
        let sink = Arc::new(MemorySink::new());
        let driver = Driver::new(Arbiter::new(cache, Arc::new(store)), sink.clone());
        (driver, sink)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn barrier_waits_for_every_probe() {
        let (driver, sink) = driver(40);
        let mut keys = RandomKeys::new(Dataset::builtin().keys(), Some(7)).unwrap();

        let summary = timeout(GUARD, driver.run(12, &mut keys, Duration::from_millis(10)))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.requests, 12);
        assert_eq!(summary.probes_completed, 24);
        assert_eq!(driver.arbiter().stats().completed_probes(), 24);
        assert_eq!(sink.len(), 12);
        assert_eq!(summary.cache_hits + summary.store_hits, 12);
        assert_eq!(summary.misses, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn every_trace_matches_dataset() {
        let (driver, sink) = driver(20);
        let dataset = Dataset::builtin();
        let mut keys = FixedKeys::new(vec![1, 2, 1, 3, 1, 2]).unwrap();

        driver
            .run(18, &mut keys, Duration::from_millis(5))
            .await
            .unwrap();

        for trace in sink.traces() {
            assert_eq!(trace.record.as_ref(), dataset.find(trace.key));
        }
        for record in driver.arbiter().cache().snapshot() {
            assert_eq!(Some(&record), dataset.find(record.id));
        }
        assert_eq!(driver.arbiter().cache().len(), 3);
    }

    #[tokio::test]
    async fn sequential_repeat_hits_cache() {
        let (driver, sink) = driver(20);
        let mut keys = FixedKeys::new(vec![1]).unwrap();

        // Pace longer than latency: the first lookup warms the cache
        let summary = driver
            .run(2, &mut keys, Duration::from_millis(60))
            .await
            .unwrap();

        assert_eq!(summary.store_hits, 1);
        assert_eq!(summary.cache_hits, 1);
        let origins: Vec<_> = sink.traces().iter().map(|t| t.origin).collect();
        assert_eq!(origins, vec![Some(Origin::Store), Some(Origin::Cache)]);
    }

    #[tokio::test]
    async fn absent_keys_are_counted_as_misses() {
        let (driver, sink) = driver(5);
        let mut keys = FixedKeys::new(vec![99, 1]).unwrap();

        let summary = timeout(GUARD, driver.run(4, &mut keys, Duration::ZERO))
            .await
            .expect("absent keys must not stall the driver")
            .unwrap();

        assert_eq!(summary.misses, 2);
        assert_eq!(sink.len(), 4);
        assert!(!driver.arbiter().cache().contains(99));
    }

    struct UnreachableStore;

    #[async_trait]
    impl BackingStore for UnreachableStore {
        async fn lookup(&self, key: RecordKey) -> RaceResult<Option<Record>> {
            Err(RaceError::store_unavailable(self.name(), key, "timed out"))
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    #[tokio::test]
    async fn failures_are_drained_before_error_returns() {
        let arbiter = Arbiter::new(SharedCache::new(), Arc::new(UnreachableStore));
        let driver = Driver::new(arbiter, Arc::new(MemorySink::new()));
        let mut keys = FixedKeys::new(vec![1, 2, 3]).unwrap();

        let err = driver
            .run(3, &mut keys, Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, RaceError::StoreUnavailable { .. }));
        assert_eq!(driver.arbiter().stats().completed_probes(), 6);
    }
}
