//! Dispatcher - the single synchronization domain of the run
//!
//! The pending queue and the load tracker live together behind one
//! mutex. [`Dispatcher::assign_next`] performs queue-pop, least-loaded
//! selection, credit, and history append under a single lock
//! acquisition, so an assignment decision is one atomic unit. Partial
//! application (reading skew without holding the lock through the
//! credit) would reintroduce the races this layout exists to prevent.
//!
//! Which worker an item is credited to is decoupled from which worker
//! calls `assign_next`: any idle worker pulls the next item, and the
//! tracker's minimum-skew choice decides the credited owner. The
//! calling worker performs the actual read; the ledger follows the
//! skew choice. This keeps the pool self-balancing without a central
//! size-aware partition step.

use crate::catalog::{Catalog, WorkItem};
use crate::dispatch::tracker::{LoadTracker, WorkerId, WorkerReport};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// One assignment decision: the item to process and the worker whose
/// ledger was charged for it
#[derive(Debug)]
pub struct Assignment {
    /// The file to process
    pub item: WorkItem,

    /// The worker credited with the item's volume
    pub worker: WorkerId,
}

/// State guarded by the dispatch lock
#[derive(Debug)]
struct DispatchState {
    /// Items not yet assigned, largest first
    pending: VecDeque<WorkItem>,

    /// Per-worker volume accounting
    tracker: LoadTracker,
}

/// Hands out work items one at a time, always crediting the
/// least-loaded worker
#[derive(Debug)]
pub struct Dispatcher {
    state: Mutex<DispatchState>,
    total_items: usize,
    total_bytes: u64,
}

impl Dispatcher {
    /// Create a dispatcher over a catalog for `workers` workers
    pub fn new(catalog: Catalog, workers: usize) -> Self {
        let total_items = catalog.len();
        let total_bytes = catalog.total_bytes();

        Self {
            state: Mutex::new(DispatchState {
                pending: catalog.into_items().into(),
                tracker: LoadTracker::new(workers),
            }),
            total_items,
            total_bytes,
        }
    }

    /// Pop the next pending item and credit the least-loaded worker
    ///
    /// Returns `None` once the queue is drained, which is the worker
    /// loop's termination signal. Pop, selection, credit, and history
    /// append happen under one lock acquisition.
    pub fn assign_next(&self) -> Option<Assignment> {
        let mut state = self.state.lock();

        let item = state.pending.pop_front()?;
        let worker = state.tracker.least_loaded();
        state.tracker.credit(worker, &item);

        Some(Assignment { item, worker })
    }

    /// Number of items not yet assigned
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Number of items in the catalog this dispatcher was built from
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Sum of all item sizes in the catalog
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Sum of volume credited so far across all workers
    pub fn total_credited(&self) -> u64 {
        self.state.lock().tracker.total_credited()
    }

    /// Snapshot of the per-worker ledgers
    pub fn reports(&self) -> Vec<WorkerReport> {
        self.state.lock().tracker.reports()
    }
}
