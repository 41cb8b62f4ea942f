use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use random_tree::builder::build;
use random_tree::data::Matrix;
use random_tree::utils::mode;
use std::time::Duration;

pub fn tree_benchmarks(c: &mut Criterion) {
    let rows = 10_000;
    let cols = 8;
    let mut data_rng = StdRng::seed_from_u64(0);
    let data_vec: Vec<f64> = (0..rows * cols).map(|_| data_rng.gen_range(0.0..1.0)).collect();
    let y: Vec<f64> = (0..rows).map(|_| data_rng.gen_range(0..20) as f64).collect();
    let data = Matrix::new(&data_vec, rows, cols);

    let index: Vec<usize> = (0..rows).collect();
    c.bench_function("mode", |b| b.iter(|| mode(black_box(&y), black_box(&index))));

    let mut group = c.benchmark_group("build_tree");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    for leaf_size in [1, 10, 50] {
        group.bench_function(format!("leaf_size_{}", leaf_size), |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                build(black_box(&data), black_box(&y), leaf_size, &mut rng).unwrap()
            })
        });
    }
    group.finish();

    let mut rng = StdRng::seed_from_u64(42);
    let tree = build(&data, &y, 1, &mut rng).unwrap();
    c.bench_function("predict_batch_single_threaded", |b| {
        b.iter(|| tree.predict_batch(black_box(&data), false).unwrap())
    });
    c.bench_function("predict_batch_parallel", |b| {
        b.iter(|| tree.predict_batch(black_box(&data), true).unwrap())
    });
}

criterion_group!(benches, tree_benchmarks);
criterion_main!(benches);
