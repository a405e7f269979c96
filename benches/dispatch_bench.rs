//! Benchmarks for filespread
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_least_loaded(c: &mut Criterion) {
    use filespread::catalog::WorkItem;
    use filespread::dispatch::LoadTracker;

    c.bench_function("tracker_least_loaded_16", |b| {
        let mut tracker = LoadTracker::new(16);
        for n in 0..64u64 {
            let worker = tracker.least_loaded();
            tracker.credit(worker, &WorkItem::new(format!("f{}", n), (n + 1) * 37));
        }

        b.iter(|| black_box(tracker.least_loaded()))
    });
}

fn benchmark_assign_drain(c: &mut Criterion) {
    use filespread::catalog::{Catalog, WorkItem};
    use filespread::dispatch::Dispatcher;

    c.bench_function("dispatcher_drain_10k", |b| {
        b.iter(|| {
            let items: Vec<WorkItem> = (0..10_000u64)
                .map(|n| WorkItem::new(format!("f{}", n), n % 4096))
                .collect();
            let dispatcher = Dispatcher::new(Catalog::from_items(items), 8);

            while let Some(assignment) = dispatcher.assign_next() {
                black_box(assignment);
            }
        })
    });
}

criterion_group!(benches, benchmark_least_loaded, benchmark_assign_drain);
criterion_main!(benches);
