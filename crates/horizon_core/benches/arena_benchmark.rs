//! # Entity Arena Benchmark
//!
//! Chunk churn pattern: spawn a chunk's worth of entities, destroy them
//! as a unit, repeat. Slots must be recycled, not grown.
//!
//! Run with: `cargo bench --package horizon_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use horizon_core::EntityArena;

/// Entities spawned by a dense city chunk.
const CITY_CHUNK_ENTITIES: usize = 3_000;

fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("arena_spawn");

    for count in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut arena = EntityArena::with_capacity(count);
                for i in 0..count {
                    black_box(arena.spawn(i));
                }
                arena.len()
            });
        });
    }

    group.finish();
}

fn bench_chunk_churn(c: &mut Criterion) {
    c.bench_function("chunk_churn_3k", |b| {
        let mut arena = EntityArena::new();
        b.iter(|| {
            let owned: Vec<_> = (0..CITY_CHUNK_ENTITIES).map(|i| arena.spawn(i)).collect();
            black_box(arena.despawn_all(owned))
        });
    });
}

criterion_group!(benches, bench_spawn, bench_chunk_churn);
criterion_main!(benches);
