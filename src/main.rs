//! filespread - Skew-Minimizing Parallel File Processor
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use filespread::catalog::Catalog;
use filespread::config::{CliArgs, SpreadConfig};
use filespread::dispatch::SpreadCoordinator;
use filespread::progress::{print_header, print_report, print_summary, ProgressReporter};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = SpreadConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(&config.root.display().to_string(), config.worker_count);
    }

    // Build the catalog; a missing directory or an empty one is fatal
    let catalog = Catalog::build(&config.root, &config.exclude_patterns)
        .context("Failed to build work catalog")?;

    // Create coordinator
    let show_progress = config.show_progress;
    let mut coordinator = SpreadCoordinator::new(config, catalog);

    // Create progress reporter; the coordinator drives and finishes it
    if show_progress {
        let reporter = ProgressReporter::new();
        reporter.set_status("Starting workers...");
        coordinator.attach_progress(reporter);
    }

    // Run the distribution
    let result = coordinator.run().context("Run failed")?;

    // Print summary and the per-worker assignment report
    print_summary(&result);
    print_report(&result);

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("filespread=debug,warn")
    } else {
        EnvFilter::new("filespread=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
