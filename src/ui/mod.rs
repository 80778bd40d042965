//! Terminal output for traces and summaries
//!
//! Styled output uses `console` and degrades to plain text when stdout is
//! not a terminal or a CI environment is detected.

mod context;
mod output;
mod sink;

pub use context::UiContext;
pub use output::{print_dataset, print_summary, step_ok_detail, step_warn_hint};
pub use sink::{ConsoleSink, JsonLinesSink, TraceFormat};
