//! Benchmark for noise sampling and chunk classification.
//!
//! Classification runs once per chunk entering the view square, so it is
//! cheap next to generation. Raw noise is measured for terrain providers.
//!
//! Run with: cargo bench --package horizon_procedural --bench noise_benchmark

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use horizon_procedural::config::NoiseConfig;
use horizon_procedural::{ChunkClassifier, ChunkCoord, NoiseTerrain, SimplexNoise, TerrainHeight, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_octaved_noise(c: &mut Criterion) {
    let noise = SimplexNoise::new(WorldSeed::new(42));

    c.bench_function("octaved_noise_6_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.octaved(black_box(x), black_box(x * 0.7), 6, 0.5, 2.0))
        });
    });
}

fn benchmark_classification(c: &mut Criterion) {
    let classifier = ChunkClassifier::new(WorldSeed::from_global(42), &NoiseConfig::default());

    let mut group = c.benchmark_group("classification");
    group.throughput(Throughput::Elements(64 * 64));

    group.bench_function("64x64_chunks", |b| {
        b.iter(|| {
            for z in -32..32 {
                for x in -32..32 {
                    black_box(classifier.classify(ChunkCoord::new(x, z)));
                }
            }
        });
    });

    group.finish();
}

fn benchmark_terrain_height(c: &mut Criterion) {
    let terrain = NoiseTerrain::new(WorldSeed::from_global(42), 40.0, 300.0);

    c.bench_function("terrain_height_sample", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 3.7;
            black_box(terrain.sample_height(black_box(x), black_box(x * 0.7)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_octaved_noise,
    benchmark_classification,
    benchmark_terrain_height,
);
criterion_main!(benches);
