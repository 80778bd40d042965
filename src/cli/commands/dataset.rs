//! Dataset command - print the records served by the store

use crate::cli::args::DatasetArgs;
use crate::cli::commands::load_dataset;
use crate::config::Config;
use crate::error::RaceResult;
use crate::ui::{self, UiContext};

/// Execute the dataset command
pub async fn execute(args: DatasetArgs, config: &Config) -> RaceResult<()> {
    let path = args.dataset.as_deref().or(config.store.dataset.as_deref());
    let dataset = load_dataset(path).await?;

    ui::print_dataset(&UiContext::detect(), &dataset);
    Ok(())
}
