//! Benchmarks for Rill ingestion components.
//!
//! Run with: cargo bench --package rill
//!
//! ## Benchmark Categories
//!
//! - **Trie Interning**: hit and miss paths of the key trie
//! - **Record Dispatch**: parse + intern + aggregate for a single line
//! - **Bulk Ingestion**: full reader loop throughput
//! - **Report**: lexicographic summary generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rill::{Engine, EngineConfig, KeyTrie};
use std::io::Cursor;

/// A station pool shaped like the real workload: short UTF-8 names with
/// heavily shared prefixes.
fn station_pool(count: usize) -> Vec<String> {
    let bases = [
        "Hamburg", "Hamilton", "Oslo", "Bergen", "Reykjavik", "Ulan Bator", "San Jose",
        "San Juan", "Santiago", "Santo Domingo",
    ];
    (0..count)
        .map(|i| format!("{} {}", bases[i % bases.len()], i / bases.len()))
        .collect()
}

/// Generates record lines over the pool with slowly varying values.
fn generate_lines(stations: &[String], count: usize) -> String {
    let mut out = String::with_capacity(count * 16);
    for i in 0..count {
        let station = &stations[i % stations.len()];
        // Deterministic one-decimal value in [-99.9, 99.9].
        let tenths = ((i as f64 * 0.7).sin() * 999.0) as i64;
        out.push_str(station);
        out.push(';');
        if tenths < 0 {
            out.push('-');
        }
        out.push_str(&format!("{}.{}", tenths.abs() / 10, tenths.abs() % 10));
        out.push('\n');
    }
    out
}

// ============================================================================
// Trie Interning Benchmarks
// ============================================================================

fn bench_intern_hit(c: &mut Criterion) {
    let stations = station_pool(500);
    let mut trie = KeyTrie::new(1 << 20, 16_384);
    for station in &stations {
        trie.intern(station.as_bytes()).unwrap();
    }

    c.bench_function("intern_hit_500_stations", |b| {
        let mut i = 0;
        b.iter(|| {
            let station = &stations[i % stations.len()];
            i += 1;
            black_box(trie.intern(black_box(station.as_bytes())).unwrap())
        })
    });
}

fn bench_intern_miss(c: &mut Criterion) {
    let stations = station_pool(10_000);

    c.bench_function("intern_fresh_10k_stations", |b| {
        b.iter_batched(
            || KeyTrie::new(1 << 20, 16_384),
            |mut trie| {
                for station in &stations {
                    trie.intern(station.as_bytes()).unwrap();
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

// ============================================================================
// Record Dispatch Benchmarks
// ============================================================================

fn bench_ingest_record(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default());
    engine.ingest_record(b"Hamburg;12.3").unwrap();

    c.bench_function("ingest_record_hit", |b| {
        b.iter(|| engine.ingest_record(black_box(b"Hamburg;12.3")).unwrap())
    });
}

// ============================================================================
// Bulk Ingestion Benchmarks
// ============================================================================

fn bench_ingest_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_reader");

    for size in [10_000, 100_000, 1_000_000].iter() {
        let stations = station_pool(500);
        let input = generate_lines(&stations, *size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter_batched(
                || Engine::new(EngineConfig::default()),
                |mut engine| {
                    engine.ingest_reader(Cursor::new(input.as_bytes())).unwrap();
                    black_box(engine.record_count())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Report Benchmarks
// ============================================================================

fn bench_summaries(c: &mut Criterion) {
    let stations = station_pool(2_000);
    let input = generate_lines(&stations, 100_000);
    let mut engine = Engine::new(EngineConfig::default());
    engine.ingest_reader(Cursor::new(input.as_bytes())).unwrap();

    c.bench_function("summaries_2k_stations", |b| {
        b.iter(|| black_box(engine.summaries()))
    });
}

criterion_group!(
    benches,
    // Trie interning
    bench_intern_hit,
    bench_intern_miss,
    // Record dispatch
    bench_ingest_record,
    // Bulk ingestion
    bench_ingest_reader,
    // Report
    bench_summaries,
);
criterion_main!(benches);
