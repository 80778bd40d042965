//! CLI command implementations

pub mod config;
pub mod dataset;
pub mod run;

pub use config::execute as config;
pub use dataset::execute as dataset;
pub use run::execute as run;

use crate::error::RaceResult;
use crate::store::Dataset;
use std::path::Path;

/// Load the dataset from `path`, or the built-in one when unset
pub(crate) async fn load_dataset(path: Option<&Path>) -> RaceResult<Dataset> {
    match path {
        Some(path) => Dataset::load(path).await,
        None => Ok(Dataset::builtin()),
    }
}
