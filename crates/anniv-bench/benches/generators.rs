//! Benchmarks for the seeded generator and string hash

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use anniv_core::{hash, consecutive_pairs, Mulberry32, RngRange};

fn bench_next_u32(c: &mut Criterion) {
    let mut rng = Mulberry32::new(1);

    c.bench_function("mulberry32_next_u32", |b| b.iter(|| black_box(rng.next_u32())));
}

fn bench_sample_range(c: &mut Criterion) {
    let mut rng = Mulberry32::new(1);
    let range = RngRange::new(-24.0, 24.0);

    c.bench_function("mulberry32_sample_range", |b| {
        b.iter(|| black_box(rng.sample(black_box(range))))
    });
}

fn bench_hash(c: &mut Criterion) {
    c.bench_function("hash_photo_filename", |b| {
        b.iter(|| black_box(hash(black_box("2024-06-01-first-date/thumbnail-12.jpg"))))
    });
}

fn bench_consecutive_pairs(c: &mut Criterion) {
    let items: Vec<u64> = (0..256).collect();

    c.bench_function("consecutive_pairs_256", |b| {
        b.iter(|| black_box(consecutive_pairs(black_box(&items))))
    });
}

criterion_group!(
    benches,
    bench_next_u32,
    bench_sample_range,
    bench_hash,
    bench_consecutive_pairs
);
criterion_main!(benches);
