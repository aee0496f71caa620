//! # Aggregation Benchmarks
//!
//! | Operation | Cost driver |
//! |-----------|-------------|
//! | `verify_single` | two pairings |
//! | `aggregate_signatures` | one pairing check per share, then point sums |
//! | `verify_aggregated` | key sum plus two pairings, independent of signer count |
//! | `batch_verify` | parallel independent checks |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pv_01_curve_arithmetic::KeyPoint;
use pv_02_signature_aggregation::{
    AggregationResult, BlsPublicKey, SecretKey, SignatureAggregationApi,
    SignatureAggregationService, SignatureShare,
};
use std::time::Duration;

const MESSAGE: [u8; 32] = [0x42; 32];

fn committee(size: usize) -> (Vec<SignatureShare>, Vec<BlsPublicKey>) {
    (0..size)
        .map(|i| {
            let mut ikm = [0u8; 32];
            ikm[..8].copy_from_slice(&(i as u64 + 1).to_le_bytes());
            let key = SecretKey::from_ikm(&ikm).expect("key");
            let mut signer = [0u8; 20];
            signer[..8].copy_from_slice(&(i as u64).to_le_bytes());
            let share = SignatureShare {
                signer,
                message_hash: MESSAGE,
                signature: key.sign(&MESSAGE).expect("sign"),
            };
            (share, key.public_key().expect("public key"))
        })
        .unzip()
}

fn bench_verify_single(c: &mut Criterion) {
    let service = SignatureAggregationService::new();
    let (shares, keys) = committee(1);

    c.bench_function("pv-02/verify_single", |b| {
        b.iter(|| {
            service.verify_single(
                black_box(&shares[0].signature),
                black_box(&MESSAGE),
                black_box(&keys[0]),
            )
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let service = SignatureAggregationService::new();
    let mut group = c.benchmark_group("pv-02/aggregate_signatures");
    group.measurement_time(Duration::from_secs(10));

    for size in [3usize, 10, 32] {
        let (shares, keys) = committee(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| service.aggregate_signatures(black_box(&shares), &MESSAGE, &keys))
        });
    }
    group.finish();
}

fn bench_verify_aggregated(c: &mut Criterion) {
    let service = SignatureAggregationService::new();
    let mut group = c.benchmark_group("pv-02/verify_aggregated");

    for size in [3usize, 10, 32] {
        let (shares, keys) = committee(size);
        let result: AggregationResult = service
            .aggregate_signatures(&shares, &MESSAGE, &keys)
            .expect("aggregate");
        let points: Vec<KeyPoint> = result.public_keys();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                service.verify_aggregated(
                    black_box(&result.aggregated_signature),
                    &MESSAGE,
                    black_box(&points),
                )
            })
        });
    }
    group.finish();
}

fn bench_batch_verify(c: &mut Criterion) {
    let service = SignatureAggregationService::new();
    let mut group = c.benchmark_group("pv-02/batch_verify");
    group.measurement_time(Duration::from_secs(10));

    for size in [8usize, 64] {
        let (shares, keys) = committee(size);
        let signatures: Vec<_> = shares.iter().map(|s| s.signature).collect();
        let messages: Vec<_> = shares.iter().map(|s| s.message_hash).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| service.batch_verify(black_box(&signatures), &messages, &keys))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_verify_single,
    bench_aggregate,
    bench_verify_aggregated,
    bench_batch_verify
);
criterion_main!(benches);
