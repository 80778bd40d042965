//! Run command - drive racing lookups and report each resolution

use crate::cache::SharedCache;
use crate::cli::args::RunArgs;
use crate::cli::commands::load_dataset;
use crate::config::Config;
use crate::driver::{Driver, FixedKeys, KeyGenerator, RandomKeys, RunSummary};
use crate::error::RaceResult;
use crate::race::{Arbiter, ResultSink};
use crate::record::RecordKey;
use crate::store::{Dataset, StoreAdapter};
use crate::ui::{self, ConsoleSink, JsonLinesSink, TraceFormat, UiContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Effective run parameters after applying CLI overrides to the config
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub iterations: usize,
    pub pace: Duration,
    pub latency: Duration,
    pub keys: Vec<RecordKey>,
    pub seed: Option<u64>,
    pub dataset: Option<PathBuf>,
    pub format: TraceFormat,
}

impl RunSettings {
    /// CLI flags win over config values
    pub fn resolve(args: RunArgs, config: &Config) -> Self {
        Self {
            iterations: args.iterations.unwrap_or(config.driver.iterations),
            pace: args
                .pace_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.driver.pace()),
            latency: args
                .latency_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.store.latency()),
            keys: args.keys,
            seed: args.seed.or(config.driver.seed),
            dataset: args.dataset.or_else(|| config.store.dataset.clone()),
            format: args.format,
        }
    }

    /// Explicit keys are cycled; otherwise keys are drawn from `dataset`
    fn key_generator(&self, dataset: &Dataset) -> RaceResult<Box<dyn KeyGenerator>> {
        if self.keys.is_empty() {
            Ok(Box::new(RandomKeys::new(dataset.keys(), self.seed)?))
        } else {
            Ok(Box::new(FixedKeys::new(self.keys.clone())?))
        }
    }
}

/// Race every lookup of one run against a fresh cache over `dataset`
async fn drive(
    settings: &RunSettings,
    dataset: Dataset,
    sink: Arc<dyn ResultSink>,
) -> RaceResult<RunSummary> {
    let mut keys = settings.key_generator(&dataset)?;
    let cache = SharedCache::new();
    let store = StoreAdapter::new(dataset, cache.clone(), settings.latency);
    let driver = Driver::new(Arbiter::new(cache, Arc::new(store)), sink);

    driver
        .run(settings.iterations, keys.as_mut(), settings.pace)
        .await
}

/// Execute the run command
pub async fn execute(args: RunArgs, config: &Config) -> RaceResult<()> {
    let settings = RunSettings::resolve(args, config);
    debug!("Run settings: {:?}", settings);

    let dataset = load_dataset(settings.dataset.as_deref()).await?;

    let ctx = UiContext::detect();
    let sink: Arc<dyn ResultSink> = match settings.format {
        TraceFormat::Text => Arc::new(ConsoleSink::new(ctx)),
        TraceFormat::Json => Arc::new(JsonLinesSink),
    };

    let summary = drive(&settings, dataset, sink).await?;

    match settings.format {
        TraceFormat::Text => ui::print_summary(&ctx, &summary),
        TraceFormat::Json => {
            println!("{}", serde_json::json!({ "summary": summary }));
        }
    }

    Ok(())
}
