//! filespread - Skew-Minimizing Parallel File Processor
//!
//! Processes every regular file in a directory across a fixed pool of
//! worker threads, assigning files one at a time so that cumulative
//! per-worker volume stays balanced throughout the run.
//!
//! # Features
//!
//! - **Dynamic load balancing**: Files are sorted largest-first and
//!   each one is credited to whichever worker currently carries the
//!   least cumulative volume, measured as normalized skew from the
//!   mean load.
//!
//! - **One synchronization domain**: The pending queue and the load
//!   tracker live behind a single mutex; queue-pop, worker selection,
//!   and credit happen as one atomic step.
//!
//! - **I/O outside the lock**: Workers read file contents strictly
//!   outside the dispatch critical section, so processing never
//!   serializes.
//!
//! - **Fault-tolerant workers**: A per-file failure is logged and
//!   counted; the worker moves on to its next assignment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Work Catalog                              │
//! │       directory listing, regular files, size-descending         │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                               │
//! │   ┌──────────────────────┐   ┌───────────────────────────┐      │
//! │   │    Pending Queue     │   │       Load Tracker        │      │
//! │   │  (largest file next) │   │  per-worker volume, skew  │      │
//! │   └──────────────────────┘   └───────────────────────────┘      │
//! │        pop + least-loaded + credit under one mutex              │
//! └──────┬───────────────┬───────────────┬──────────────────────────┘
//!        │               │               │
//!  ┌─────▼─────┐   ┌─────▼─────┐   ┌─────▼─────┐
//!  │  Worker 0 │   │  Worker 1 │   │  Worker N │
//!  │  process  │   │  process  │   │  process  │
//!  └───────────┘   └───────────┘   └───────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Process with the default 10 workers
//! filespread /data/logs
//!
//! # Four workers, skip temp files
//! filespread /data/logs 4 --exclude '\.tmp$'
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod process;
pub mod progress;

pub use catalog::{Catalog, WorkItem};
pub use config::{CliArgs, SpreadConfig};
pub use dispatch::{SpreadCoordinator, SpreadResult, WorkerReport};
pub use error::{Result, SpreadError};
pub use process::{FileReader, Processor};
