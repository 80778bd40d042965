//! Authoritative backing store
//!
//! Provides a trait for slow, authoritative lookups so the race can be run
//! against the built-in dataset adapter or any other source.

pub mod adapter;
pub mod dataset;

pub use adapter::StoreAdapter;
pub use dataset::Dataset;

use crate::error::RaceResult;
use crate::record::{Record, RecordKey};
use async_trait::async_trait;

/// Abstract authoritative store
///
/// `Ok(None)` is a genuine miss. `Err` means the store could not answer,
/// which callers must not treat as a miss.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Resolve a key against the store
    async fn lookup(&self, key: RecordKey) -> RaceResult<Option<Record>>;

    /// Human-readable store name for logs and errors
    fn name(&self) -> &'static str;
}
