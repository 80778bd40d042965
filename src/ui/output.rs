//! Output functions for consistent CLI formatting

use super::context::UiContext;
use crate::driver::RunSummary;
use crate::store::Dataset;
use console::style;

/// Display a success step with detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        println!("  {} {} ({})", style("✓").green(), message, style(detail).dim());
    } else {
        println!("  [OK] {} ({})", message, detail);
    }
}

/// Display a warning step with hint
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        println!("  {} {} - {}", style("!").yellow(), message, style(hint).dim());
    } else {
        println!("  [WARN] {} - {}", message, hint);
    }
}

/// Print the totals of a run
pub fn print_summary(ctx: &UiContext, summary: &RunSummary) {
    println!();
    if ctx.use_fancy_output() {
        println!("{}", style("Summary").bold());
    } else {
        println!("Summary");
    }

    let rows = [
        ("requests", summary.requests),
        ("from cache", summary.cache_hits),
        ("from store", summary.store_hits),
        ("not found", summary.misses),
        ("failed", summary.failures),
        ("probes completed", summary.probes_completed),
        ("cached entries", summary.cached_entries),
    ];
    for (label, value) in rows {
        println!("  {:<18} {}", label, value);
    }
    println!("  {:<18} {} ms", "elapsed", summary.elapsed_ms);
}

/// Print every record of a dataset as a table
pub fn print_dataset(ctx: &UiContext, dataset: &Dataset) {
    let header = format!("{:<6} {:<30} {:<22} {}", "ID", "TITLE", "AUTHOR", "YEAR");
    if ctx.use_fancy_output() {
        println!("{}", style(header).bold());
    } else {
        println!("{}", header);
    }
    println!("{}", "-".repeat(64));

    for record in dataset.iter() {
        println!(
            "{:<6} {:<30} {:<22} {}",
            record.id, record.title, record.author, record.year
        );
    }

    println!();
    println!("{} record(s)", dataset.len());
}
