//! Configuration types for filespread
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Skew-minimizing parallel file processor
#[derive(Parser, Debug, Clone)]
#[command(
    name = "filespread",
    version,
    about = "Skew-minimizing parallel file processor",
    long_about = "Processes every regular file in a directory across a pool of worker threads.\n\n\
                  Files are sorted by size (largest first) and handed out one at a time to \
                  whichever worker currently carries the least cumulative volume, keeping \
                  per-worker load balanced without a size-aware partition step up front.",
    after_help = "EXAMPLES:\n    \
        filespread /data/logs\n    \
        filespread /data/logs 4\n    \
        filespread /data/logs 16 --exclude '\\.tmp$' -v"
)]
pub struct CliArgs {
    /// Directory containing the files to process
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Number of worker threads
    #[arg(value_name = "WORKERS", default_value_t = 10)]
    pub workers: usize,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (show per-file activity)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Exclude paths matching pattern (can be repeated)
    #[arg(long = "exclude", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub exclude_patterns: Vec<String>,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct SpreadConfig {
    /// Source directory
    pub root: PathBuf,

    /// Number of worker threads (before clamping to the catalog size)
    pub worker_count: usize,

    /// Show progress indicator
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,

    /// Compiled exclude patterns
    pub exclude_patterns: Vec<Regex>,
}

impl SpreadConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Validate worker count
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        // Compile exclude patterns
        let exclude_patterns = args
            .exclude_patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: args.dir,
            worker_count: args.workers,
            show_progress: !args.quiet,
            verbose: args.verbose,
            exclude_patterns,
        })
    }
}
