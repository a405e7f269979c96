//! Dynamic minimum-skew work distribution
//!
//! This module implements the scheduling core: a shared dispatcher
//! hands files to a pool of worker threads one at a time, always
//! crediting the worker whose cumulative volume deviates least from
//! the mean.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────────────────────┐
//!                  │         Dispatcher           │
//!                  │  ┌────────────────────────┐  │
//!                  │  │ pending queue (by size)│  │  one mutex:
//!                  │  │ load tracker (skew)    │  │  pop + select +
//!                  │  └────────────────────────┘  │  credit atomically
//!                  └──────┬───────┬───────┬───────┘
//!                         │       │       │
//!                   ┌─────▼──┐ ┌──▼─────┐ ┌─▼──────┐
//!                   │Worker 0│ │Worker 1│ │Worker N│
//!                   │process │ │process │ │process │  I/O outside
//!                   └────────┘ └────────┘ └────────┘  the lock
//! ```

pub mod coordinator;
pub mod dispatcher;
pub mod tracker;
pub mod worker;

pub use coordinator::{SpreadCoordinator, SpreadProgress, SpreadResult};
pub use dispatcher::{Assignment, Dispatcher};
pub use tracker::{LoadTracker, WorkerId, WorkerReport};
pub use worker::{Worker, WorkerStats};
