//! Benchmarks for algebraic number arithmetic and comparison.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use qbar::algebraic::{guess_f64, root_of_unity, AlgebraicNumber, GuessOptions};
use qbar::integers::Rational;

/// `√2 + √3 + … + √n`, a number of degree `2^(π(n))`.
fn sum_of_square_roots(n: i64) -> AlgebraicNumber {
    (2..=n).fold(AlgebraicNumber::from_integer(0), |acc, k| {
        let root = AlgebraicNumber::from_integer(k).sqrt().expect("square root");
        acc.add(&root).expect("sum")
    })
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for n in [3, 5, 7] {
        group.bench_with_input(BenchmarkId::new("sum_of_square_roots", n), &n, |b, &n| {
            b.iter(|| sum_of_square_roots(black_box(n)));
        });
    }

    let a = AlgebraicNumber::from_integer(2).nth_root(3).expect("cube root");
    let b = AlgebraicNumber::from_integer(3).sqrt().expect("square root");
    group.bench_function("mul_cbrt2_sqrt3", |bench| {
        bench.iter(|| black_box(&a).mul(black_box(&b)));
    });
    group.bench_function("inv_cbrt2", |bench| {
        bench.iter(|| black_box(&a).inv());
    });

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");

    // √2 + √3 against a rational within 2^-40 of it.
    let x = sum_of_square_roots(3);
    let close = Rational::from_f64(x.to_f64()).expect("finite");
    let y = AlgebraicNumber::from_rational(close);
    group.bench_function("close_reals", |b| {
        b.iter(|| black_box(&x).cmp_real(black_box(&y)));
    });

    let z = root_of_unity(12, 5).expect("root of unity");
    let w = z.conj();
    group.bench_function("conjugate_equality", |b| {
        b.iter(|| black_box(&z).try_eq(black_box(&w)));
    });

    group.finish();
}

fn bench_roots_of_unity(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_of_unity");

    for n in [5u64, 12, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| root_of_unity(black_box(n), 1));
        });
    }

    group.finish();
}

fn bench_guess(c: &mut Criterion) {
    let mut group = c.benchmark_group("guess");

    let options = GuessOptions::default().max_bits(8);
    group.bench_function("sqrt2", |b| {
        b.iter(|| guess_f64(black_box(std::f64::consts::SQRT_2), 1e-14, &options));
    });

    let golden = (1.0 + 5f64.sqrt()) / 2.0;
    group.bench_function("golden_ratio", |b| {
        b.iter(|| guess_f64(black_box(golden), 1e-14, &options));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_comparison,
    bench_roots_of_unity,
    bench_guess
);
criterion_main!(benches);
