//! CLI argument definitions using clap derive

use crate::record::RecordKey;
use crate::ui::TraceFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// racecache - race a local cache against an authoritative store
///
/// Each lookup probes the cache and the store concurrently and reports
/// whichever answers first. Store hits warm the cache for later lookups.
#[derive(Parser, Debug)]
#[command(name = "racecache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RACECACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a sequence of racing lookups
    Run(RunArgs),

    /// Print the dataset served by the store
    Dataset(DatasetArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Number of lookups to issue
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Delay between lookups in milliseconds
    #[arg(long)]
    pub pace_ms: Option<u64>,

    /// Artificial store latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Keys to look up, cycled in order (comma-separated; random when unset)
    #[arg(short, long, value_delimiter = ',')]
    pub keys: Vec<RecordKey>,

    /// Seed for random keys
    #[arg(long, conflicts_with = "keys")]
    pub seed: Option<u64>,

    /// TOML dataset file
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Trace output format
    #[arg(short, long, default_value = "text")]
    pub format: TraceFormat,
}

/// Arguments for the dataset command
#[derive(Parser, Debug)]
pub struct DatasetArgs {
    /// TOML dataset file
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
