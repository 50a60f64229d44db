// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use pact_core::Future;

/// Cost of chaining `map` calls on an already-resolved future: each `map`
/// derives a new future and registers a callback that fires inline under
/// the synchronous default executor.
pub fn bench_map_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_chain");

    for &depth in &[1usize, 8, 64, 256] {
        group.throughput(Throughput::Elements(depth as u64));
        let id = BenchmarkId::from_parameter(depth);
        group.bench_with_input(id, &depth, |bencher, &depth| {
            bencher.iter(|| {
                let mut future = Future::successful(0i64);
                for _ in 0..depth {
                    future = future.map(|v| v + 1, None);
                }
                black_box(future.result().unwrap());
            });
        });
    }

    group.finish();
}

/// Cost of `gather`ing a growing number of already-resolved futures.
pub fn bench_gather(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather");

    for &count in &[1usize, 8, 64, 256] {
        group.throughput(Throughput::Elements(count as u64));
        let id = BenchmarkId::from_parameter(count);
        group.bench_with_input(id, &count, |bencher, &count| {
            bencher.iter(|| {
                let futures: Vec<_> = (0..count).map(Future::successful).collect();
                let gathered = Future::gather(futures, false, None).unwrap();
                black_box(gathered.result().unwrap());
            });
        });
    }

    group.finish();
}
