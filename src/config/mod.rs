//! Configuration management for racecache
//!
//! A single optional TOML file. Every setting has a default, so a missing
//! file or a missing section is never an error; a malformed value is.

pub mod schema;

pub use schema::{Config, LogFormat};

use crate::error::{RaceError, RaceResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Locates, reads and writes the config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for the default config file
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a manager for an explicit config file (`--config`)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// `<config dir>/racecache/config.toml`, or the working directory when
    /// the platform has no config dir
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("racecache")
            .join("config.toml")
    }

    /// Load the config file, falling back to defaults when it does not exist
    ///
    /// Unknown values (a bad `log_format`, a negative `iterations`) are
    /// reported as `ConfigInvalid` with the file path.
    pub async fn load(&self) -> RaceResult<Config> {
        match fs::read_to_string(&self.config_path).await {
            Ok(content) => self.parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No config at {}, using defaults",
                    self.config_path.display()
                );
                Ok(Config::default())
            }
            Err(e) => Err(RaceError::io(
                format!("reading config from {}", self.config_path.display()),
                e,
            )),
        }
    }

    /// Write `config` as pretty TOML, creating the parent directory
    pub async fn save(&self, config: &Config) -> RaceResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RaceError::io(format!("writing config to {}", self.config_path.display()), e)
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Path this manager reads and writes
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn parse(&self, content: &str) -> RaceResult<Config> {
        toml::from_str(content).map_err(|e| RaceError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.message().to_string(),
        })
    }

    /// Create the directory holding the config file
    async fn ensure_config_dir(&self) -> RaceResult<()> {
        let Some(parent) = self.config_path.parent() else {
            return Ok(());
        };
        fs::create_dir_all(parent)
            .await
            .map_err(|e| RaceError::ConfigDirCreate {
                path: parent.to_path_buf(),
                source: e,
            })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
