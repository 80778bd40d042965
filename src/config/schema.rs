//! Configuration schema for racecache
//!
//! Configuration is stored at `~/.config/racecache/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Backing store settings
    pub store: StoreConfig,

    /// Lookup driver settings
    pub driver: DriverConfig,
}

/// General application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log output format
    pub log_format: LogFormat,
}

/// Format of diagnostic logs on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Backing store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Artificial latency per store lookup in milliseconds
    pub latency_ms: u64,

    /// TOML dataset file (built-in dataset when unset)
    pub dataset: Option<PathBuf>,
}

impl StoreConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: 100,
            dataset: None,
        }
    }
}

/// Lookup driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Number of lookups per run
    pub iterations: usize,

    /// Delay between issuing lookups in milliseconds
    pub pace_ms: u64,

    /// Seed for reproducible key sequences
    pub seed: Option<u64>,
}

impl DriverConfig {
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            pace_ms: 50,
            seed: None,
        }
    }
}
