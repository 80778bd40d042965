//! Resolution traces and the sinks that receive them

use crate::race::types::{LookupRequest, Origin, Resolution};
use crate::record::{Record, RecordKey};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trace entry emitted once per resolved request
///
/// `origin` is `null` when neither source had the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Correlation ID of the request
    pub request_id: Uuid,

    /// Requested key
    pub key: RecordKey,

    /// Source that answered
    pub origin: Option<Origin>,

    /// Resolved record
    pub record: Option<Record>,

    /// When the winning outcome was observed
    pub resolved_at: DateTime<Utc>,
}

impl Trace {
    /// Build a trace for a resolved request
    pub fn new(request: &LookupRequest, resolution: &Resolution) -> Self {
        Self {
            request_id: request.id,
            key: request.key,
            origin: resolution.origin(),
            record: resolution.record().cloned(),
            resolved_at: Utc::now(),
        }
    }
}

/// Destination for resolution traces, in completion order
pub trait ResultSink: Send + Sync {
    /// Accept one trace
    fn emit(&self, trace: &Trace);
}

/// Sink that keeps every trace in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    traces: Mutex<Vec<Trace>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the traces received so far
    pub fn traces(&self) -> Vec<Trace> {
        self.traces.lock().clone()
    }

    /// Number of traces received
    pub fn len(&self) -> usize {
        self.traces.lock().len()
    }

    /// Whether nothing was emitted
    pub fn is_empty(&self) -> bool {
        self.traces.lock().is_empty()
    }
}

impl ResultSink for MemorySink {
    fn emit(&self, trace: &Trace) {
        self.traces.lock().push(trace.clone());
    }
}
