//! Error types for racecache
//!
//! All modules use `RaceResult<T>` as their return type. A key that is
//! absent from both the cache and the store is a normal outcome and never
//! shows up here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for racecache operations
pub type RaceResult<T> = Result<T, RaceError>;

/// All errors that can occur in racecache
#[derive(Error, Debug)]
pub enum RaceError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Dataset errors
    #[error("Invalid dataset: {0}")]
    DatasetInvalid(String),

    // Lookup errors
    #[error("Invalid key list: {0}")]
    KeysInvalid(String),

    #[error("Store {store} unavailable while resolving key {key}: {reason}")]
    StoreUnavailable {
        store: String,
        key: u64,
        reason: String,
    },

    #[error("Probe task for key {key} did not complete: {reason}")]
    ProbeFailed { key: u64, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RaceError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a store-unavailable error
    pub fn store_unavailable(store: impl Into<String>, key: u64, reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store: store.into(),
            key,
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } | Self::TomlParse(_) => {
                Some("Run: racecache config init --force")
            }
            Self::DatasetInvalid(_) => {
                Some("Each [[records]] entry needs a unique id, title, author and year")
            }
            _ => None,
        }
    }
}
