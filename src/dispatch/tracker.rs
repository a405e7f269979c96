//! Load tracker - per-worker volume accounting and skew computation
//!
//! The tracker holds, for each worker, the cumulative byte volume it
//! has been credited with and the ordered list of files behind that
//! volume. Credit is eager: a worker's volume grows when a file is
//! assigned, not when it finishes, so skew measures assigned work.
//! That policy is what lets one mutex acquisition cover a complete
//! assignment decision.
//!
//! The tracker itself is not synchronized; the dispatcher owns it
//! behind its lock and is the only mutator.

use crate::catalog::WorkItem;
use std::path::PathBuf;

/// Worker identifier: dense indices 0..N
pub type WorkerId = usize;

/// Accounting state for one worker
#[derive(Debug)]
struct WorkerState {
    /// Cumulative credited volume in bytes
    credited: u64,

    /// Ordered list of files credited to this worker
    history: Vec<PathBuf>,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            credited: 0,
            history: Vec::new(),
        }
    }
}

/// Final per-worker accounting, extracted for reporting
#[derive(Debug, Clone)]
pub struct WorkerReport {
    /// Worker identifier
    pub id: WorkerId,

    /// Total credited volume in bytes
    pub credited: u64,

    /// Files credited to this worker, in assignment order
    pub items: Vec<PathBuf>,
}

/// Tracks cumulative credited volume across all workers
#[derive(Debug)]
pub struct LoadTracker {
    workers: Vec<WorkerState>,
}

impl LoadTracker {
    /// Create a tracker for `count` workers, all starting at zero load
    pub fn new(count: usize) -> Self {
        assert!(count > 0, "tracker requires at least one worker");

        Self {
            workers: (0..count).map(|_| WorkerState::new()).collect(),
        }
    }

    /// Number of tracked workers
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Credited volume for one worker
    pub fn load(&self, worker: WorkerId) -> u64 {
        self.workers[worker].credited
    }

    /// Sum of credited volume across all workers
    pub fn total_credited(&self) -> u64 {
        self.workers.iter().map(|w| w.credited).sum()
    }

    /// Normalized deviation of one worker's volume from the mean
    ///
    /// Defined as `(load - mean) / max_load`. While no worker has been
    /// credited anything (`max_load == 0`) the skew is 0.0 for every
    /// worker, so the first selection falls through to the tie-break.
    pub fn skew(&self, worker: WorkerId) -> f64 {
        let max_load = self.workers.iter().map(|w| w.credited).max().unwrap_or(0);
        if max_load == 0 {
            return 0.0;
        }

        let total: u64 = self.total_credited();
        let mean = total as f64 / self.workers.len() as f64;

        (self.workers[worker].credited as f64 - mean) / max_load as f64
    }

    /// The worker with minimal skew, ties broken by lowest identifier
    ///
    /// With all loads at zero this deterministically returns worker 0.
    pub fn least_loaded(&self) -> WorkerId {
        let mut best = 0;
        let mut best_skew = self.skew(0);

        for id in 1..self.workers.len() {
            let skew = self.skew(id);
            if skew < best_skew {
                best = id;
                best_skew = skew;
            }
        }

        best
    }

    /// Credit a worker with an item's volume and record it in that
    /// worker's history
    ///
    /// Must only be called while the dispatcher's lock is held, so the
    /// selection that chose `worker` and this credit are one atomic
    /// step.
    pub fn credit(&mut self, worker: WorkerId, item: &WorkItem) {
        let state = &mut self.workers[worker];
        state.credited += item.size;
        state.history.push(item.path.clone());
    }

    /// Extract the final per-worker reports
    pub fn reports(&self) -> Vec<WorkerReport> {
        self.workers
            .iter()
            .enumerate()
            .map(|(id, w)| WorkerReport {
                id,
                credited: w.credited,
                items: w.history.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, size: u64) -> WorkItem {
        WorkItem::new(name, size)
    }

    #[test]
    fn test_initial_skew_is_zero() {
        let tracker = LoadTracker::new(4);
        for id in 0..4 {
            assert_eq!(tracker.skew(id), 0.0);
        }
    }

    #[test]
    fn test_zero_load_selects_lowest_id() {
        let tracker = LoadTracker::new(8);
        assert_eq!(tracker.least_loaded(), 0);
    }

    #[test]
    fn test_skew_after_credit() {
        let mut tracker = LoadTracker::new(2);
        tracker.credit(0, &item("a", 100));

        // Loads (100, 0): mean 50, max 100
        assert!((tracker.skew(0) - 0.5).abs() < 1e-9);
        assert!((tracker.skew(1) + 0.5).abs() < 1e-9);
        assert_eq!(tracker.least_loaded(), 1);
    }

    #[test]
    fn test_least_loaded_tie_breaks_low() {
        let mut tracker = LoadTracker::new(3);
        tracker.credit(0, &item("a", 10));
        tracker.credit(1, &item("b", 10));
        tracker.credit(2, &item("c", 10));

        // All equal again: lowest id wins
        assert_eq!(tracker.least_loaded(), 0);
    }

    #[test]
    fn test_least_loaded_is_minimal() {
        let mut tracker = LoadTracker::new(4);
        let sizes = [100u64, 40, 40, 25, 25, 10, 10, 5, 5, 1];

        for (n, &size) in sizes.iter().enumerate() {
            let chosen = tracker.least_loaded();
            let chosen_skew = tracker.skew(chosen);

            // Each choice is locally optimal at decision time
            for id in 0..tracker.worker_count() {
                assert!(
                    chosen_skew <= tracker.skew(id),
                    "assignment {} picked worker {} with skew {} but worker {} has {}",
                    n,
                    chosen,
                    chosen_skew,
                    id,
                    tracker.skew(id)
                );
            }

            tracker.credit(chosen, &item(&format!("f{}", n), size));
        }

        assert_eq!(tracker.total_credited(), sizes.iter().sum::<u64>());
    }

    #[test]
    fn test_credit_records_history() {
        let mut tracker = LoadTracker::new(2);
        tracker.credit(1, &item("first", 30));
        tracker.credit(1, &item("second", 20));

        let reports = tracker.reports();
        assert_eq!(reports[0].items.len(), 0);
        assert_eq!(reports[1].credited, 50);
        assert_eq!(
            reports[1].items,
            vec![PathBuf::from("first"), PathBuf::from("second")]
        );
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn test_zero_workers_rejected() {
        LoadTracker::new(0);
    }
}
