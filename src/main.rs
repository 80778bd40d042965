//! racecache - cache versus store lookup race
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use racecache::cli::args::RunArgs;
use racecache::cli::{Cli, Commands};
use racecache::config::{ConfigManager, LogFormat};
use racecache::error::RaceResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RaceResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    // 0 = warn, 1 = info, 2+ = debug; logs go to stderr, traces to stdout
    let filter = match cli.verbose {
        0 => EnvFilter::new("racecache=warn"),
        1 => EnvFilter::new("racecache=info"),
        _ => EnvFilter::new("racecache=debug"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.general.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.without_time().init(),
    }

    match cli.command {
        None => racecache::cli::commands::run(RunArgs::default(), &config).await,
        Some(Commands::Run(args)) => racecache::cli::commands::run(args, &config).await,
        Some(Commands::Dataset(args)) => racecache::cli::commands::dataset(args, &config).await,
        Some(Commands::Config(args)) => {
            racecache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
