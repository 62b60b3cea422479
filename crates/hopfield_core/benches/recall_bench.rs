//! Recall benchmarks
//!
//! Weight construction cost and settle throughput as the network grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hopfield_core::{build_weights, recall_all, settle, sigmoid_vec};
use std::time::Duration;

/// Generate `count` deterministic patterns of length `dim` in [0, 1]
fn generate_patterns(count: usize, dim: usize) -> Vec<Vec<f64>> {
    (0..count)
        .map(|i| {
            (0..dim)
                .map(|j| 0.5 + 0.4 * ((i * 7 + j * 3) as f64 * 0.37).sin())
                .collect()
        })
        .collect()
}

fn bench_build_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_weights");
    group.measurement_time(Duration::from_secs(5));

    for dim in [16, 64, 256].iter() {
        let patterns = generate_patterns(8, *dim);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &patterns, |b, p| {
            b.iter(|| build_weights(black_box(p)))
        });
    }

    group.finish();
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle");
    group.measurement_time(Duration::from_secs(5));

    for dim in [16, 64, 256].iter() {
        let patterns = generate_patterns(4, *dim);
        let Ok(weights) = build_weights(&patterns) else {
            continue;
        };
        let probe = sigmoid_vec(&patterns[0]);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &probe, |b, p| {
            b.iter(|| settle(&weights, black_box(p), Some(10_000)))
        });
    }

    group.finish();
}

fn bench_recall_all(c: &mut Criterion) {
    let digits = vec![
        vec![0.9, 0.1, 0.1, 0.9],
        vec![0.1, 0.9, 0.9, 0.1],
        vec![0.8, 0.2, 0.2, 0.8],
    ];
    c.bench_function("recall_all_digits_100_epochs", |b| {
        b.iter(|| recall_all(black_box(&digits), 100))
    });
}

criterion_group!(benches, bench_build_weights, bench_settle, bench_recall_all);
criterion_main!(benches);
