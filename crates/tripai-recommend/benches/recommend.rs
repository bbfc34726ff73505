//! Benchmarks for the recommendation pipeline hot paths
//! Run: cargo bench -p tripai-recommend --bench recommend

use chrono::Utc;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tripai_core::TravelLog;
use tripai_recommend::{rank_products, top_k, EmbeddingSnapshot};

const DIMENSION: usize = 384;

// deterministic pseudo-vectors, no rand dependency needed
fn vector(seed: usize) -> Vec<f32> {
    let raw: Vec<f32> = (0..DIMENSION)
        .map(|i| ((seed * 31 + i * 7) % 97) as f32 / 97.0 - 0.5)
        .collect();
    let norm: f32 = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
    raw.iter().map(|x| x / norm).collect()
}

fn snapshot(n: usize) -> EmbeddingSnapshot {
    EmbeddingSnapshot {
        trip_ids: (0..n).map(|i| format!("T{}", i)).collect(),
        texts: (0..n).map(|i| format!("log sentence {}", i)).collect(),
        vectors: (0..n).map(vector).collect(),
        dimension: DIMENSION,
        built_at: Utc::now(),
        partial_coverage: false,
    }
}

fn logs(n: usize) -> Vec<TravelLog> {
    (0..n)
        .map(|i| TravelLog {
            trip_id: format!("T{}", i),
            place: if i % 3 == 0 { "서울" } else { "부산" }.to_string(),
            days: "2".to_string(),
            companion_relation: "친구".to_string(),
            companion_age_group: "20대".to_string(),
            gender: "여성".to_string(),
            age: "20".to_string(),
            product_id: format!("P{}", i % 20),
            satisfaction_score: if i % 5 == 0 { None } else { Some((i % 6) as f64) },
            category: "맛집".to_string(),
        })
        .collect()
}

fn bench_top_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_k");
    let query = vector(12345);

    for size in [100, 1_000, 10_000] {
        let snap = snapshot(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snap, |b, snap| {
            b.iter(|| top_k(black_box(&query), black_box(snap), 50).unwrap());
        });
    }
    group.finish();
}

fn bench_rank_products(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_products");

    for size in [50, 500, 5_000] {
        let rows = logs(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| rank_products(black_box(rows), "서울", 5));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_top_k, bench_rank_products);
criterion_main!(benches);
