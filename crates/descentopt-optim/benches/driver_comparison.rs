//! Benchmarks comparing gradient descent and the globalized Newton method
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use descentopt_core::prelude::*;
use descentopt_optim::{
    GlobalNewton, GlobalNewtonConfig, GradientDescent, GradientDescentConfig, NewtonSafeguard,
};
use descentopt_symbolic::SymbolicObjective;

fn line_search_params() -> LineSearchParams<f64> {
    LineSearchParams::new(0.5, 0.1).unwrap()
}

/// Well-conditioned diagonal quadratic with minimizer at the origin
fn diagonal_quadratic(dim: usize) -> QuadraticObjective<f64> {
    let diag = DVector::from_fn(dim, |i, _| 1.0 + i as f64 / dim as f64);
    QuadraticObjective::new(DMatrix::from_diagonal(&diag), DVector::zeros(dim), 0.0).unwrap()
}

fn benchmark_quadratic(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadratic");

    for &dim in &[10, 50, 100] {
        let cost = diagonal_quadratic(dim);
        let x0 = DVector::from_element(dim, 1.0);
        let criterion = StoppingCriterion::new(1e-6).unwrap();

        group.bench_with_input(BenchmarkId::new("gradient_descent", dim), &dim, |b, _| {
            b.iter(|| {
                let mut gd = GradientDescent::new(GradientDescentConfig::new(line_search_params()));
                gd.optimize(black_box(&cost), black_box(&x0), &criterion)
            });
        });

        group.bench_with_input(BenchmarkId::new("global_newton", dim), &dim, |b, _| {
            b.iter(|| {
                let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
                    line_search_params(),
                    NewtonSafeguard::new(1e-6, 0.1).unwrap(),
                ));
                newton.optimize(black_box(&cost), black_box(&x0), &criterion)
            });
        });
    }

    group.finish();
}

fn benchmark_symbolic(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbolic");

    let problems = [
        (
            "quartic",
            "2*x1^4 + (2/3)*x1^3 + x1^2 - 2*x1^2*x2 + (4/3)*x2^2",
            vec![1.0, 1.0],
        ),
        ("rosenbrock", "100*(x2 - x1^2)^2 + (1 - x1)^2", vec![-1.2, 1.0]),
    ];

    for (name, text, start) in problems {
        let f = SymbolicObjective::<f64>::parse(text, &["x1", "x2"]).unwrap();
        let x0 = DVector::from_vec(start);
        let criterion = StoppingCriterion::new(1e-5).unwrap();

        group.bench_function(BenchmarkId::new("gradient_descent", name), |b| {
            b.iter(|| {
                let mut gd = GradientDescent::new(GradientDescentConfig::new(line_search_params()));
                gd.optimize(black_box(&f), black_box(&x0), &criterion)
            });
        });

        group.bench_function(BenchmarkId::new("global_newton", name), |b| {
            b.iter(|| {
                let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
                    line_search_params(),
                    NewtonSafeguard::new(1e-6, 0.1).unwrap(),
                ));
                newton.optimize(black_box(&f), black_box(&x0), &criterion)
            });
        });
    }

    group.finish();
}

fn benchmark_derivatives(c: &mut Criterion) {
    let f = SymbolicObjective::<f64>::parse(
        "2*x1^4 + (2/3)*x1^3 + x1^2 - 2*x1^2*x2 + (4/3)*x2^2",
        &["x1", "x2"],
    )
    .unwrap();
    let x = DVector::from_vec(vec![0.3, -0.7]);

    c.bench_function("symbolic_gradient", |b| b.iter(|| f.gradient(black_box(&x))));
    c.bench_function("symbolic_hessian", |b| b.iter(|| f.hessian(black_box(&x))));
}

criterion_group!(
    benches,
    benchmark_quadratic,
    benchmark_symbolic,
    benchmark_derivatives
);
criterion_main!(benches);
