//! Shared in-memory record cache
//!
//! A key to record map behind a reader/writer lock. Any number of readers
//! proceed in parallel; a writer excludes everyone else for the duration of
//! a single insert.
//!
//! # Invariant
//!
//! The only writer is the store adapter after a confirmed hit, so every
//! entry equals the dataset record for its key. Entries are never removed.
//!
//! | Operation | Lock | Fails |
//! |-----------|------|-------|
//! | `get` | shared | never |
//! | `put` | exclusive | never |

use crate::record::{Record, RecordKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Concurrent key to record cache
///
/// Cloning yields another handle to the same map, so one instance can be
/// handed to the store adapter and to every cache probe.
#[derive(Debug, Clone, Default)]
pub struct SharedCache {
    entries: Arc<RwLock<HashMap<RecordKey, Record>>>,
}

impl SharedCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record, holding the read lock only for the lookup
    pub fn get(&self, key: RecordKey) -> Option<Record> {
        self.entries.read().get(&key).cloned()
    }

    /// Insert or overwrite a record
    pub fn put(&self, key: RecordKey, record: Record) {
        self.entries.write().insert(key, record);
    }

    /// Whether a key is present
    pub fn contains(&self, key: RecordKey) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of all entries, ordered by key
    pub fn snapshot(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.entries.read().values().cloned().collect();
        records.sort_by_key(Record::key);
        records
    }
}
