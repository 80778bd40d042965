//! Dataset-backed store with cache write-through

use crate::cache::SharedCache;
use crate::error::RaceResult;
use crate::record::{Record, RecordKey};
use crate::store::{BackingStore, Dataset};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Store adapter over a fixed dataset
///
/// Every lookup pays `latency` before scanning. A hit is written into the
/// shared cache before the lookup returns, so the write happens-before the
/// caller sees the record.
pub struct StoreAdapter {
    dataset: Dataset,
    cache: SharedCache,
    latency: Duration,
}

impl StoreAdapter {
    /// Create a new adapter writing hits into `cache`
    pub fn new(dataset: Dataset, cache: SharedCache, latency: Duration) -> Self {
        Self {
            dataset,
            cache,
            latency,
        }
    }
}

#[async_trait]
impl BackingStore for StoreAdapter {
    async fn lookup(&self, key: RecordKey) -> RaceResult<Option<Record>> {
        tokio::time::sleep(self.latency).await;

        match self.dataset.find(key) {
            Some(record) => {
                self.cache.put(key, record.clone());
                debug!("Store hit for key {}, cache populated", key);
                Ok(Some(record.clone()))
            }
            None => {
                debug!("Store miss for key {}", key);
                Ok(None)
            }
        }
    }

    fn name(&self) -> &'static str {
        "dataset"
    }
}
