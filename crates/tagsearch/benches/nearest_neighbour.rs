//! Benchmarks for brute-force nearest-neighbour search over a store.
//!
//! Run with: `cargo bench -p tagsearch`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use tagsearch::conversion::StringConverter;
use tagsearch::{
    with_read, with_write, BruteNearestNeighbour, DistanceMetric, FloatVector,
    FloatVectorConverter, RedbEngine, TypedPairDatabase,
};

const DIMENSION: usize = 128;

/// Generate a random vector of the specified dimension.
fn random_vector(dim: usize) -> FloatVector {
    let mut rng = rand::thread_rng();
    (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f32>>().into()
}

/// Build an in-memory store of `count` random vectors.
fn populated_store(
    count: usize,
) -> (RedbEngine, TypedPairDatabase<StringConverter, FloatVectorConverter>) {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let values = FloatVectorConverter::new();
    let db = TypedPairDatabase::open(&engine, "bench", StringConverter, values)
        .expect("failed to open store");

    for chunk in (0..count).collect::<Vec<_>>().chunks(1000) {
        with_write(&engine, |tx| {
            for i in chunk {
                db.put(tx, &format!("test{i}"), &random_vector(DIMENSION))?;
            }
            Ok(())
        })
        .expect("failed to populate store");
    }
    (engine, db)
}

/// Benchmark a full scan returning K neighbours, across store sizes.
fn bench_get_neighbours(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_get_neighbours");
    group.sample_size(20);

    for count in [1_000, 10_000] {
        let (engine, db) = populated_store(count);
        let query = FloatVector::ones(DIMENSION);

        for metric in [DistanceMetric::Euclidean, DistanceMetric::Cosine] {
            let nn = BruteNearestNeighbour::new(&db, metric);
            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{metric:?}"), count),
                &count,
                |bench, _| {
                    bench.iter(|| {
                        with_read(&engine, |tx| {
                            nn.get_neighbours(tx, black_box(query.as_slice()), 150)
                        })
                        .expect("search failed")
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the effect of K on a fixed store.
fn bench_varying_k(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_varying_k");
    group.sample_size(20);

    let (engine, db) = populated_store(10_000);
    let query = random_vector(DIMENSION);
    let nn = BruteNearestNeighbour::new(&db, DistanceMetric::Euclidean);

    for k in [1, 10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |bench, &k| {
            bench.iter(|| {
                with_read(&engine, |tx| nn.get_neighbours(tx, black_box(query.as_slice()), k))
                    .expect("search failed")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_neighbours, bench_varying_k);
criterion_main!(benches);
