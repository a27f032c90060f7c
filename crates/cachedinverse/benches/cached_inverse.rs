//! Benchmark: cache hits against recomputing the inverse

use cachedinverse::{invert, CachedMatrix, Matrix};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_invertible(n: usize, seed: u64) -> Matrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut m = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            m[[i, j]] = rng.gen_range(-1.0..1.0);
        }
        m[[i, i]] += n as f64;
    }
    m
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for n in [4usize, 16, 64] {
        let a = random_invertible(n, 0xC0FFEE);

        group.bench_with_input(BenchmarkId::new("recompute", n), &a, |b, a| {
            b.iter(|| invert(black_box(a)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("cached", n), &a, |b, a| {
            let mut cm = CachedMatrix::new(a.clone());
            cm.inverse().unwrap();
            b.iter(|| black_box(&mut cm).inverse().unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inverse);
criterion_main!(benches);
