//! Worker thread logic
//!
//! Each worker:
//! - Pulls one assignment at a time from the shared dispatcher
//! - Invokes the processing capability outside the dispatch lock
//! - Records its own throughput stats
//! - Terminates when the pending queue is drained
//!
//! A worker's loop is Idle -> Requesting -> Processing -> Idle until
//! the dispatcher signals empty. Per-file failures are logged and
//! counted, never propagated.

use crate::dispatch::dispatcher::{Assignment, Dispatcher};
use crate::error::WorkerError;
use crate::process::Processor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Files processed (successes and failures)
    pub files_processed: AtomicU64,

    /// Bytes processed (sum of sizes of successfully read files)
    pub bytes_processed: AtomicU64,

    /// Per-file processing failures
    pub errors: AtomicU64,
}

impl WorkerStats {
    fn record_file(&self, bytes: u64) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
        self.bytes_processed.fetch_add(bytes, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// A worker thread that processes file assignments
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        dispatcher: Arc<Dispatcher>,
        processor: Arc<dyn Processor>,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("spread-{}", id))
            .spawn(move || worker_loop(id, dispatcher, processor, stats_clone))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// Whether the worker's thread has run to completion
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| WorkerError::Panicked {
                id: self.id,
                message: "Worker thread panicked".into(),
            })?;
        }
        Ok(())
    }
}

/// Main worker loop
fn worker_loop(
    id: usize,
    dispatcher: Arc<Dispatcher>,
    processor: Arc<dyn Processor>,
    stats: Arc<WorkerStats>,
) {
    info!(worker = id, "Worker starting");

    // Empty queue terminates the loop; the credited worker may differ
    // from this one, so both ids go into the logs
    while let Some(Assignment { item, worker }) = dispatcher.assign_next() {
        debug!(
            worker = id,
            credited = worker,
            path = %item.path.display(),
            size = item.size,
            "Processing file"
        );

        match processor.process(&item) {
            Ok(()) => stats.record_file(item.size),
            Err(e) => {
                stats.record_error();
                warn!(
                    worker = id,
                    path = %item.path.display(),
                    error = %e,
                    "Processing failed"
                );
            }
        }
    }

    info!(
        worker = id,
        files = stats.files_processed.load(Ordering::Relaxed),
        bytes = stats.bytes_processed.load(Ordering::Relaxed),
        errors = stats.errors.load(Ordering::Relaxed),
        "Worker finished"
    );
}

/// Aggregate statistics from multiple workers
pub fn aggregate_stats(workers: &[Worker]) -> (u64, u64, u64) {
    let mut files = 0u64;
    let mut bytes = 0u64;
    let mut errors = 0u64;

    for worker in workers {
        files += worker.stats.files_processed.load(Ordering::Relaxed);
        bytes += worker.stats.bytes_processed.load(Ordering::Relaxed);
        errors += worker.stats.errors.load(Ordering::Relaxed);
    }

    (files, bytes, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, WorkItem};
    use crate::error::ProcessResult;

    /// Processor that records every path it sees
    struct Recording {
        seen: parking_lot::Mutex<Vec<std::path::PathBuf>>,
    }

    impl Processor for Recording {
        fn process(&self, item: &WorkItem) -> ProcessResult<()> {
            self.seen.lock().push(item.path.clone());
            Ok(())
        }
    }

    /// Processor that fails on every file
    struct AlwaysFails;

    impl Processor for AlwaysFails {
        fn process(&self, item: &WorkItem) -> ProcessResult<()> {
            Err(crate::error::ProcessError::NotFound {
                path: item.path.clone(),
            })
        }
    }

    fn catalog(sizes: &[u64]) -> Catalog {
        Catalog::from_items(
            sizes
                .iter()
                .enumerate()
                .map(|(n, &size)| WorkItem::new(format!("f{}", n), size))
                .collect(),
        )
    }

    #[test]
    fn test_worker_drains_queue() {
        let dispatcher = Arc::new(Dispatcher::new(catalog(&[30, 20, 10]), 1));
        let processor = Arc::new(Recording {
            seen: parking_lot::Mutex::new(Vec::new()),
        });

        let worker = Worker::spawn(0, Arc::clone(&dispatcher), processor.clone()).unwrap();
        worker.join().unwrap();

        assert_eq!(dispatcher.pending_len(), 0);
        assert_eq!(processor.seen.lock().len(), 3);
    }

    #[test]
    fn test_worker_stats() {
        let stats = WorkerStats::default();

        stats.record_file(1024);
        stats.record_file(512);
        stats.record_error();

        assert_eq!(stats.files_processed.load(Ordering::Relaxed), 3);
        assert_eq!(stats.bytes_processed.load(Ordering::Relaxed), 1536);
        assert_eq!(stats.errors.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_processing_failure_does_not_stop_worker() {
        let dispatcher = Arc::new(Dispatcher::new(catalog(&[30, 20, 10]), 1));

        let worker = Worker::spawn(0, Arc::clone(&dispatcher), Arc::new(AlwaysFails)).unwrap();
        let stats = Arc::clone(&worker.stats);
        worker.join().unwrap();

        // All three files were attempted despite every one failing
        assert_eq!(dispatcher.pending_len(), 0);
        assert_eq!(stats.files_processed.load(Ordering::Relaxed), 3);
        assert_eq!(stats.errors.load(Ordering::Relaxed), 3);
    }
}
