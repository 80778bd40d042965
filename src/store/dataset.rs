//! Authoritative dataset backing the store
//!
//! Datasets are fixed for the lifetime of the process. They come either
//! from the built-in table or from a TOML file of `[[records]]` tables:
//!
//! ```toml
//! [[records]]
//! id = 1
//! title = "Dune"
//! author = "Frank Herbert"
//! year = 1965
//! ```

use crate::error::{RaceError, RaceResult};
use crate::record::{Record, RecordKey};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct DatasetFile {
    records: Vec<Record>,
}

/// Immutable ordered sequence of records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Build a dataset, rejecting empty input and duplicate keys
    pub fn new(records: Vec<Record>) -> RaceResult<Self> {
        if records.is_empty() {
            return Err(RaceError::DatasetInvalid(
                "dataset contains no records".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(RaceError::DatasetInvalid(format!(
                    "duplicate key {}",
                    record.id
                )));
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// The built-in ten-book table, keyed 1 through 10
    pub fn builtin() -> Self {
        let records = vec![
            Record::new(1, "The Hobbit", "J.R.R. Tolkien", 1937),
            Record::new(2, "The Lord of the Rings", "J.R.R. Tolkien", 1954),
            Record::new(3, "Dune", "Frank Herbert", 1965),
            Record::new(4, "Neuromancer", "William Gibson", 1984),
            Record::new(5, "Foundation", "Isaac Asimov", 1951),
            Record::new(6, "Hyperion", "Dan Simmons", 1989),
            Record::new(7, "A Wizard of Earthsea", "Ursula K. Le Guin", 1968),
            Record::new(8, "Snow Crash", "Neal Stephenson", 1992),
            Record::new(9, "The Left Hand of Darkness", "Ursula K. Le Guin", 1969),
            Record::new(10, "Solaris", "Stanislaw Lem", 1961),
        ];
        Self {
            records: records.into(),
        }
    }

    /// Load a dataset from a TOML file
    pub async fn load(path: &Path) -> RaceResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RaceError::io(format!("reading dataset from {}", path.display()), e))?;

        let file: DatasetFile = toml::from_str(&content).map_err(|e| {
            RaceError::DatasetInvalid(format!("{}: {}", path.display(), e.message()))
        })?;

        let dataset = Self::new(file.records)?;
        debug!(
            "Loaded {} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Scan for a record in dataset order
    pub fn find(&self, key: RecordKey) -> Option<&Record> {
        self.records.iter().find(|record| record.id == key)
    }

    /// All keys, in dataset order
    pub fn keys(&self) -> Vec<RecordKey> {
        self.records.iter().map(Record::key).collect()
    }

    /// Iterate records in dataset order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty (never true for a constructed dataset)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
