//! Progress reporting and final output
//!
//! Provides real-time progress display using indicatif progress bars,
//! plus the styled summary and the per-worker assignment report
//! printed at the end of a run.

use crate::dispatch::{SpreadProgress, SpreadResult};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays run status
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, progress: &SpreadProgress) {
        let bytes_str = format_size(progress.bytes_done, BINARY);
        let rate = progress.files_per_second();

        let msg = format!(
            "Files: {}/{} | Read: {} | Rate: {:.0}/s | Pending: {} | Workers: {}/{}",
            format_number(progress.files_done),
            format_number(progress.total_files),
            bytes_str,
            rate,
            progress.pending,
            progress.active_workers,
            progress.total_workers,
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the run
pub fn print_header(dir: &str, workers: usize) {
    println!();
    println!(
        "{} {}",
        style("filespread").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Source:").bold(), dir);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!();
}

/// Print a summary of the run results
pub fn print_summary(result: &SpreadResult) {
    let bytes_str = format_size(result.bytes_processed, BINARY);
    let duration_secs = result.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        result.files_processed as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!("{}", style("Run Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Files:").bold(),
        format_number(result.files_processed)
    );
    println!("  {} {}", style("Total Size:").bold(), bytes_str);
    println!(
        "  {} {:.1}s ({:.0} files/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if result.errors > 0 {
        println!(
            "  {} {}",
            style("Errors:").yellow().bold(),
            format_number(result.errors)
        );
    }
    println!();
}

/// Print the per-worker assignment report
///
/// One block per worker: its credited volume followed by the ordered
/// list of files it was credited with.
pub fn print_report(result: &SpreadResult) {
    println!("{}", style("Assignments").bold());
    println!("{}", style("─".repeat(50)).dim());

    for report in &result.workers {
        println!(
            "  {} {} files, {}",
            style(format!("Worker {}:", report.id)).bold(),
            report.items.len(),
            format_size(report.credited, BINARY),
        );
        for path in &report.items {
            println!("    {}", path.display());
        }
    }
    println!();
}
