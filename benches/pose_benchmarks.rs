//! Benchmarks for the angle and direction engines

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pose_coach::{
    angles::{compute_angle, compute_pose_angles},
    directions::{compute_direction, compute_pose_directions},
    features::FeatureExtractor,
    landmarks::{Landmark, PoseLandmarks},
    snapshot::PoseSnapshot,
};

/// Random full-body detection
fn random_pose() -> PoseLandmarks {
    let rows: Vec<[f64; 4]> = (0..33)
        .map(|_| {
            [
                rand::random::<f64>(),
                rand::random::<f64>(),
                rand::random::<f64>() - 0.5,
                rand::random::<f64>(),
            ]
        })
        .collect();
    PoseLandmarks::from_rows(&rows).expect("33 rows")
}

fn benchmark_single_joint(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_joint");

    let (p, v, d) = (Landmark::new(0.4, 0.3), Landmark::new(0.45, 0.5), Landmark::new(0.6, 0.55));

    group.bench_function("compute_angle", |b| {
        b.iter(|| black_box(compute_angle(black_box(&p), black_box(&v), black_box(&d))));
    });
    group.bench_function("compute_direction", |b| {
        b.iter(|| black_box(compute_direction(black_box(&p), black_box(&v), black_box(&d))));
    });

    group.finish();
}

fn benchmark_full_pose(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pose");
    let poses: Vec<PoseLandmarks> = (0..100).map(|_| random_pose()).collect();

    group.bench_with_input(BenchmarkId::new("angles", 100), &poses, |b, poses| {
        b.iter(|| {
            for pose in poses {
                black_box(compute_pose_angles(Some(pose)));
            }
        });
    });

    group.bench_with_input(BenchmarkId::new("directions", 100), &poses, |b, poses| {
        b.iter(|| {
            for pose in poses {
                black_box(compute_pose_directions(Some(pose)));
            }
        });
    });

    group.bench_with_input(BenchmarkId::new("snapshot_and_features", 100), &poses, |b, poses| {
        let extractor = FeatureExtractor::new();
        b.iter(|| {
            for pose in poses {
                let snapshot = PoseSnapshot::from_landmarks(Some(pose));
                black_box(extractor.extract(Some(pose), &snapshot.angles));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_joint, benchmark_full_pose);
criterion_main!(benches);
