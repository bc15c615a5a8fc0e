//! Benchmarks for fractalstream generation and analysis.
//!
//! Measures parameter derivation, keystream throughput at several stream
//! lengths, and the analyzer's single-pass cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fractalstream::{analyze, KeyParams, KeystreamGenerator};

/// Password used consistently across all benchmarks.
const BENCH_PASSWORD: &str = "BenchmarkPassword2024";

/// Benchmarks `KeyParams::derive` (two digests plus byte mapping).
fn bench_derive_params(c: &mut Criterion) {
    c.bench_function("derive_params", |b| {
        b.iter(|| KeyParams::derive(black_box(BENCH_PASSWORD)));
    });
}

/// Benchmarks keystream throughput across stream lengths.
///
/// The generator is constructed once per length; each iteration replays
/// the full orbit from the seed, reflecting the real usage pattern of
/// the pure-function API.
fn bench_generate(c: &mut Criterion) {
    let lengths: &[usize] = &[1_024, 16_384, 65_536];

    let mut group = c.benchmark_group("generate");
    for &length in lengths {
        let gen = KeystreamGenerator::new(BENCH_PASSWORD);
        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &n| {
            b.iter(|| gen.generate(black_box(n)));
        });
    }
    group.finish();
}

/// Benchmarks the full statistical pass over a fixed stream.
fn bench_analyze(c: &mut Criterion) {
    let stream = KeystreamGenerator::new(BENCH_PASSWORD).generate(65_536);

    let mut group = c.benchmark_group("analyze");
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("65536_bytes", |b| {
        b.iter(|| analyze(black_box(&stream)));
    });
    group.finish();
}

criterion_group!(benches, bench_derive_params, bench_generate, bench_analyze);
criterion_main!(benches);
