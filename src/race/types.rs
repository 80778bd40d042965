//! Request, probe outcome and resolution types

use crate::record::{Record, RecordKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One lookup to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupRequest {
    /// Correlation ID carried into the trace
    pub id: Uuid,

    /// Key to resolve
    pub key: RecordKey,
}

impl LookupRequest {
    /// Create a request with a fresh correlation ID
    pub fn new(key: RecordKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
        }
    }
}

/// Which source answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Store,
}

impl Origin {
    /// The competing source
    pub fn other(self) -> Self {
        match self {
            Self::Cache => Self::Store,
            Self::Store => Self::Cache,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(Record),
    NotFound,
}

impl From<Option<Record>> for ProbeOutcome {
    fn from(record: Option<Record>) -> Self {
        match record {
            Some(record) => Self::Found(record),
            None => Self::NotFound,
        }
    }
}

/// Final answer for a lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { origin: Origin, record: Record },
    NotFound,
}

impl Resolution {
    /// Source that answered, if any
    pub fn origin(&self) -> Option<Origin> {
        match self {
            Self::Found { origin, .. } => Some(*origin),
            Self::NotFound => None,
        }
    }

    /// Resolved record, if any
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_other() {
        assert_eq!(Origin::Cache.other(), Origin::Store);
        assert_eq!(Origin::Store.other(), Origin::Cache);
    }

    #[test]
    fn origin_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Origin::Cache).unwrap(), "\"cache\"");
        assert_eq!(Origin::Store.to_string(), "store");
    }

    #[test]
    fn outcome_from_option() {
        let record = Record::new(1, "A", "Anon", 2000);
        assert_eq!(
            ProbeOutcome::from(Some(record.clone())),
            ProbeOutcome::Found(record)
        );
        assert_eq!(ProbeOutcome::from(None), ProbeOutcome::NotFound);
    }

    #[test]
    fn requests_get_distinct_ids() {
        let a = LookupRequest::new(1);
        let b = LookupRequest::new(1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn resolution_accessors() {
        let record = Record::new(1, "A", "Anon", 2000);
        let found = Resolution::Found {
            origin: Origin::Store,
            record: record.clone(),
        };
        assert_eq!(found.origin(), Some(Origin::Store));
        assert_eq!(found.record(), Some(&record));
        assert_eq!(Resolution::NotFound.record(), None);
    }
}
