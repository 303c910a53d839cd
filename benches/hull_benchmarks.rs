//! Benchmarks for the hull computations.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigInt;
use polyhull::{BasicSet, Set};

fn row(v: &[i64]) -> Vec<BigInt> {
    v.iter().map(|&x| BigInt::from(x)).collect()
}

fn square(x0: i64, y0: i64, x1: i64, y1: i64) -> BasicSet {
    let mut b = BasicSet::universe(2);
    b.add_inequality(row(&[-x0, 1, 0]));
    b.add_inequality(row(&[x1, -1, 0]));
    b.add_inequality(row(&[-y0, 0, 1]));
    b.add_inequality(row(&[y1, 0, -1]));
    b
}

/// Benchmark the facet-wrapping path on a bounded union.
fn bench_wrap_hull(c: &mut Criterion) {
    c.bench_function("hull_two_squares", |b| {
        b.iter(|| {
            let s = Set::from_members(
                2,
                vec![
                    black_box(square(0, 0, 1, 1)),
                    black_box(square(2, 2, 3, 3)),
                ],
            );
            s.convex_hull().unwrap()
        })
    });
}

/// Benchmark the Fourier-Motzkin path on an unbounded union.
fn bench_minkowski_hull(c: &mut Criterion) {
    c.bench_function("hull_parallel_strips", |b| {
        b.iter(|| {
            let mut lo = BasicSet::universe(2);
            lo.add_inequality(row(&[0, 0, 1]));
            lo.add_inequality(row(&[1, 0, -1]));
            let mut hi = BasicSet::universe(2);
            hi.add_inequality(row(&[-4, 0, 1]));
            hi.add_inequality(row(&[5, 0, -1]));
            let s = Set::from_members(2, vec![black_box(lo), black_box(hi)]);
            s.convex_hull().unwrap()
        })
    });
}

/// Benchmark redundancy elimination on a single polyhedron.
fn bench_reduce(c: &mut Criterion) {
    c.bench_function("reduce_single", |b| {
        b.iter(|| {
            let mut p = square(0, 0, 10, 10);
            for k in 1..8 {
                p.add_inequality(row(&[10 + k, -1, 0]));
            }
            black_box(p).convex_hull().unwrap()
        })
    });
}

criterion_group!(benches, bench_wrap_hull, bench_minkowski_hull, bench_reduce);
criterion_main!(benches);
