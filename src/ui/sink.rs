//! Sinks writing traces to stdout

use super::context::UiContext;
use crate::race::{Origin, ResultSink, Trace};
use clap::ValueEnum;
use console::style;
use std::io::Write;
use tracing::warn;

/// How traces are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TraceFormat {
    /// One human-readable line per lookup
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Human-readable trace lines
pub struct ConsoleSink {
    ctx: UiContext,
}

impl ConsoleSink {
    /// Create a sink styled for `ctx`
    pub fn new(ctx: UiContext) -> Self {
        Self { ctx }
    }

    /// Render a trace as a single line
    pub fn render(&self, trace: &Trace) -> String {
        let (label, detail) = match (&trace.origin, &trace.record) {
            (Some(origin), Some(record)) => (format!("from {}", origin), record.to_string()),
            _ => ("not found".to_string(), format!("key {}", trace.key)),
        };

        if !self.ctx.use_fancy_output() {
            return format!("{:<11} {}", label, detail);
        }

        let label = format!("{:<11}", label);
        let label = match trace.origin {
            Some(Origin::Cache) => style(label).green(),
            Some(Origin::Store) => style(label).cyan(),
            None => style(label).yellow(),
        };
        format!("{} {}", label, detail)
    }
}

impl ResultSink for ConsoleSink {
    fn emit(&self, trace: &Trace) {
        println!("{}", self.render(trace));
    }
}

/// JSON lines on stdout
#[derive(Debug, Default)]
pub struct JsonLinesSink;

impl ResultSink for JsonLinesSink {
    /// Drops the trace on serialization or write failure; the run itself
    /// must not fail because stdout went away.
    fn emit(&self, trace: &Trace) {
        let line = match serde_json::to_string(trace) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize trace for key {}: {}", trace.key, e);
                return;
            }
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            warn!("Failed to write trace: {}", e);
        }
    }
}
