//! Record type looked up by key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a record
pub type RecordKey = u64;

/// A single record, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key
    pub id: RecordKey,

    /// Title of the book
    pub title: String,

    /// Author name
    pub author: String,

    /// Publication year
    pub year: u16,
}

impl Record {
    /// Create a new record
    pub fn new(id: RecordKey, title: &str, author: &str, year: u16) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }

    /// The key this record is stored under
    pub fn key(&self) -> RecordKey {
        self.id
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} \"{}\" by {} ({})",
            self.id, self.title, self.author, self.year
        )
    }
}
