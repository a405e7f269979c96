//! Run coordinator - orchestrates the parallel distribution run
//!
//! The coordinator is responsible for:
//! - Clamping the worker count to the catalog size
//! - Spawning the worker pool over the shared dispatcher
//! - Driving the progress display while workers run
//! - Joining all workers and assembling the final result

use crate::catalog::Catalog;
use crate::config::SpreadConfig;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::tracker::WorkerReport;
use crate::dispatch::worker::{aggregate_stats, Worker};
use crate::error::Result;
use crate::process::{FileReader, Processor};
use crate::progress::ProgressReporter;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a completed run
#[derive(Debug)]
pub struct SpreadResult {
    /// Files in the catalog
    pub total_files: u64,

    /// Bytes in the catalog
    pub total_bytes: u64,

    /// Files actually processed (successes and failures)
    pub files_processed: u64,

    /// Bytes successfully read
    pub bytes_processed: u64,

    /// Per-file processing failures
    pub errors: u64,

    /// Time taken for the run
    pub duration: Duration,

    /// Per-worker ledgers: credited volume and ordered file list
    pub workers: Vec<WorkerReport>,
}

/// Progress information for display
#[derive(Debug, Clone)]
pub struct SpreadProgress {
    /// Files processed so far
    pub files_done: u64,

    /// Files in the catalog
    pub total_files: u64,

    /// Bytes read so far
    pub bytes_done: u64,

    /// Items not yet assigned
    pub pending: usize,

    /// Workers still running
    pub active_workers: usize,

    /// Total workers
    pub total_workers: usize,

    /// Errors encountered
    pub errors: u64,

    /// Elapsed time
    pub elapsed: Duration,
}

impl SpreadProgress {
    /// Calculate files per second rate
    pub fn files_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.files_done as f64 / secs
        } else {
            0.0
        }
    }
}

/// Coordinates the parallel distribution run
pub struct SpreadCoordinator {
    /// Configuration
    config: Arc<SpreadConfig>,

    /// Shared queue + load tracker
    dispatcher: Arc<Dispatcher>,

    /// Effective worker count after clamping
    worker_count: usize,

    /// Processing capability handed to every worker
    processor: Arc<dyn Processor>,

    /// Worker threads
    workers: Vec<Worker>,

    /// Progress display, if attached
    progress: Option<ProgressReporter>,
}

impl SpreadCoordinator {
    /// Create a coordinator that reads file contents
    pub fn new(config: SpreadConfig, catalog: Catalog) -> Self {
        Self::with_processor(config, catalog, Arc::new(FileReader))
    }

    /// Create a coordinator with an explicit processing capability
    pub fn with_processor(
        config: SpreadConfig,
        catalog: Catalog,
        processor: Arc<dyn Processor>,
    ) -> Self {
        // More workers than files just means idle threads; clamp so the
        // final report has no empty ledgers
        let mut worker_count = config.worker_count;
        if worker_count > catalog.len() {
            warn!(
                requested = worker_count,
                files = catalog.len(),
                "Worker count exceeds file count, clamping"
            );
            worker_count = catalog.len();
        }

        let dispatcher = Arc::new(Dispatcher::new(catalog, worker_count));

        Self {
            config: Arc::new(config),
            dispatcher,
            worker_count,
            processor,
            workers: Vec::new(),
            progress: None,
        }
    }

    /// Attach a progress reporter, updated while workers run
    pub fn attach_progress(&mut self, progress: ProgressReporter) {
        self.progress = Some(progress);
    }

    /// Effective worker count after clamping
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Run the distribution to completion
    pub fn run(mut self) -> Result<SpreadResult> {
        let start_time = Instant::now();

        info!(
            dir = %self.config.root.display(),
            workers = self.worker_count,
            files = self.dispatcher.total_items(),
            bytes = self.dispatcher.total_bytes(),
            "Starting run"
        );

        self.spawn_workers()?;
        self.wait_for_completion(start_time);

        let (files_processed, bytes_processed, errors) = self.join_workers();
        let duration = start_time.elapsed();

        if let Some(ref progress) = self.progress {
            progress.finish("Run completed");
        }

        info!(
            files = files_processed,
            bytes = bytes_processed,
            errors = errors,
            duration_secs = duration.as_secs(),
            "Run completed"
        );

        Ok(SpreadResult {
            total_files: self.dispatcher.total_items() as u64,
            total_bytes: self.dispatcher.total_bytes(),
            files_processed,
            bytes_processed,
            errors,
            duration,
            workers: self.dispatcher.reports(),
        })
    }

    /// Spawn worker threads
    fn spawn_workers(&mut self) -> Result<()> {
        for id in 0..self.worker_count {
            let worker = Worker::spawn(
                id,
                Arc::clone(&self.dispatcher),
                Arc::clone(&self.processor),
            )?;

            self.workers.push(worker);
        }

        info!(count = self.workers.len(), "Workers spawned");
        Ok(())
    }

    /// Poll until every worker has drained out of its loop
    ///
    /// Work is finite and pre-enumerated, so completion is simply all
    /// workers observing the empty queue and returning.
    fn wait_for_completion(&self, start_time: Instant) {
        let check_interval = Duration::from_millis(100);

        loop {
            let active = self
                .workers
                .iter()
                .filter(|w| !w.is_finished())
                .count();

            if active == 0 {
                return;
            }

            if let Some(ref progress) = self.progress {
                let (files_done, bytes_done, errors) = aggregate_stats(&self.workers);
                progress.update(&SpreadProgress {
                    files_done,
                    total_files: self.dispatcher.total_items() as u64,
                    bytes_done,
                    pending: self.dispatcher.pending_len(),
                    active_workers: active,
                    total_workers: self.worker_count,
                    errors,
                    elapsed: start_time.elapsed(),
                });
            }

            thread::sleep(check_interval);
        }
    }

    /// Join all worker threads and collect final stats
    fn join_workers(&mut self) -> (u64, u64, u64) {
        // Stats are read before joining; workers are already drained
        let stats = aggregate_stats(&self.workers);

        let workers = std::mem::take(&mut self.workers);
        for worker in workers {
            if let Err(e) = worker.join() {
                warn!(error = %e, "Worker failed to join cleanly");
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WorkItem;
    use crate::config::SpreadConfig;

    fn config(workers: usize) -> SpreadConfig {
        SpreadConfig {
            root: "/test".into(),
            worker_count: workers,
            show_progress: false,
            verbose: false,
            exclude_patterns: Vec::new(),
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

    /// Processor that succeeds without touching the filesystem
    struct Noop;

    impl Processor for Noop {
        fn process(&self, _item: &WorkItem) -> crate::error::ProcessResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_worker_count_clamped_to_catalog() {
        let coordinator =
            SpreadCoordinator::with_processor(config(5), catalog(&[10, 20]), Arc::new(Noop));
        assert_eq!(coordinator.worker_count(), 2);
    }

    #[test]
    fn test_clamped_run_gives_one_item_each() {
        let coordinator =
            SpreadCoordinator::with_processor(config(5), catalog(&[10, 20]), Arc::new(Noop));
        let result = coordinator.run().unwrap();

        assert_eq!(result.workers.len(), 2);
        for report in &result.workers {
            assert_eq!(report.items.len(), 1);
        }
    }

    #[test]
    fn test_run_processes_everything() {
        let sizes = [100u64, 80, 60, 40, 20, 10, 5];
        let coordinator =
            SpreadCoordinator::with_processor(config(3), catalog(&sizes), Arc::new(Noop));
        let result = coordinator.run().unwrap();

        assert_eq!(result.files_processed, sizes.len() as u64);
        assert_eq!(result.bytes_processed, sizes.iter().sum::<u64>());
        assert_eq!(result.errors, 0);

        let credited: u64 = result.workers.iter().map(|r| r.credited).sum();
        assert_eq!(credited, sizes.iter().sum::<u64>());
    }
}
