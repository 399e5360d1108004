//! Benchmarks for pose comparison and reference aggregation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pose_coach::{
    aggregate::aggregate,
    comparator::PoseComparator,
    directions::Direction,
    joints::Joint,
    snapshot::PoseSnapshot,
};

fn random_snapshot() -> PoseSnapshot {
    PoseSnapshot {
        angles: Joint::ALL
            .into_iter()
            .map(|j| (j, Some(rand::random::<f64>() * 180.0)))
            .collect(),
        directions: Joint::ALL
            .into_iter()
            .map(|j| (j, Some(Direction::ALL[rand::random::<usize>() % Direction::ALL.len()])))
            .collect(),
    }
}

fn benchmark_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let comparator = PoseComparator::default();
    let reference = random_snapshot();

    group.bench_function("identical", |b| {
        b.iter(|| black_box(comparator.compare_snapshots(black_box(&reference), black_box(&reference))));
    });

    let users: Vec<PoseSnapshot> = (0..100).map(|_| random_snapshot()).collect();
    group.bench_with_input(BenchmarkId::new("random_users", 100), &users, |b, users| {
        b.iter(|| {
            for user in users {
                black_box(comparator.compare_snapshots(user, &reference));
            }
        });
    });

    group.finish();
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for samples in [10, 100, 1000] {
        let snapshots: Vec<PoseSnapshot> = (0..samples).map(|_| random_snapshot()).collect();
        group.bench_with_input(BenchmarkId::new("samples", samples), &snapshots, |b, snapshots| {
            b.iter(|| black_box(aggregate("bench", snapshots, 3)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_compare, benchmark_aggregate);
criterion_main!(benches);
