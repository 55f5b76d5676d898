//! Integration tests for the descent drivers.
//!
//! Both drivers are run on symbolic objectives and on closed-form
//! quadratics, checking convergence, the terminal-state contract and the
//! trajectory they hand back.

use approx::assert_relative_eq;
use descentopt_core::prelude::*;
use descentopt_optim::{
    GlobalNewton, GlobalNewtonConfig, GradientDescent, GradientDescentConfig, NewtonSafeguard,
};
use descentopt_symbolic::SymbolicObjective;
use pretty_assertions::assert_eq;

const QUARTIC: &str = "2*x1^4 + (2/3)*x1^3 + x1^2 - 2*x1^2*x2 + (4/3)*x2^2";

fn params() -> LineSearchParams<f64> {
    LineSearchParams::new(0.5, 0.1).unwrap()
}

fn gradient_descent() -> GradientDescent<f64> {
    GradientDescent::new(GradientDescentConfig::new(params()))
}

fn global_newton() -> GlobalNewton<f64> {
    GlobalNewton::new(GlobalNewtonConfig::new(
        params(),
        NewtonSafeguard::new(1e-6, 0.1).unwrap(),
    ))
}

fn check_terminal_contract(result: &OptimizationResult<f64>, tol: f64) {
    match result.termination_reason {
        TerminationReason::Converged => {
            assert!(result.converged);
            assert!(result.gradient_norm <= tol);
        }
        TerminationReason::MaxIterations => {
            assert!(!result.converged);
            assert!(result.gradient_norm > tol);
        }
        TerminationReason::CallbackRequest => {}
    }
    let (last_point, last_value) = result.trajectory.last().unwrap();
    assert_eq!(last_point, &result.point);
    assert_eq!(last_value, result.value);
    assert_eq!(result.trajectory.len(), result.iterations + 1);
}

#[test]
fn quartic_scenario_converges_with_both_drivers() {
    let f = SymbolicObjective::<f64>::parse(QUARTIC, &["x1", "x2"]).unwrap();
    let x0 = DVector::from_vec(vec![1.0, 1.0]);
    let criterion = StoppingCriterion::new(1e-5).unwrap();

    let gd = gradient_descent().optimize(&f, &x0, &criterion).unwrap();
    let newton = global_newton().optimize(&f, &x0, &criterion).unwrap();

    for result in [&gd, &newton] {
        assert_eq!(result.termination_reason, TerminationReason::Converged);
        assert!(result.gradient_norm <= 1e-5);
        assert_eq!(result.trajectory.first().map(|(p, _)| p.clone()), Some(x0.clone()));
        check_terminal_contract(result, 1e-5);

        // the only stationary point with positive definite Hessian is the origin
        assert_relative_eq!(result.point[0], 0.0, epsilon = 1e-4);
        assert_relative_eq!(result.point[1], 0.0, epsilon = 1e-4);
    }

    assert!(newton.newton_steps > 0);
}

#[test]
fn convex_quadratic_from_two_starts() {
    // f = ½ xᵀAx + bᵀx with x* = −A⁻¹b = (1, −1)
    let a = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]);
    let x_star = DVector::from_vec(vec![1.0, -1.0]);
    let b = -(&a * &x_star);
    let cost = QuadraticObjective::new(a, b, 0.0).unwrap();
    let criterion = StoppingCriterion::new(1e-6).unwrap();

    for start in [vec![10.0, 10.0], vec![-7.0, 3.0]] {
        let x0 = DVector::from_vec(start);

        let gd = gradient_descent().optimize(&cost, &x0, &criterion).unwrap();
        let newton = global_newton().optimize(&cost, &x0, &criterion).unwrap();

        for result in [&gd, &newton] {
            assert!(result.converged);
            check_terminal_contract(result, 1e-6);
            assert_relative_eq!(result.point, x_star, epsilon = 1e-5);
        }
    }
}

#[test]
fn symbolic_and_closed_form_objectives_agree() {
    // ½(3x² + 2xy + 2y²) - 2x + y, the quadratic above written out
    let symbolic =
        SymbolicObjective::<f64>::parse("0.5*(3*x^2 + 2*x*y + 2*y^2) - 2*x + y", &["x", "y"])
            .unwrap();
    let closed = QuadraticObjective::new(
        DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]),
        DVector::from_vec(vec![-2.0, 1.0]),
        0.0,
    )
    .unwrap();
    let x0 = DVector::from_vec(vec![4.0, 4.0]);
    let criterion = StoppingCriterion::new(1e-8).unwrap();

    let a = global_newton().optimize(&symbolic, &x0, &criterion).unwrap();
    let b = global_newton().optimize(&closed, &x0, &criterion).unwrap();

    assert_eq!(a.iterations, b.iterations);
    assert_relative_eq!(a.point, b.point, epsilon = 1e-10);
}

#[test]
fn budget_exhaustion_is_a_result_not_an_error() {
    let f = SymbolicObjective::<f64>::parse("100*(y - x^2)^2 + (1 - x)^2", &["x", "y"]).unwrap();
    let x0 = DVector::from_vec(vec![-1.2, 1.0]);
    let criterion = StoppingCriterion::new(1e-10).unwrap().with_max_iterations(5);

    let result = gradient_descent().optimize(&f, &x0, &criterion).unwrap();

    assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
    assert!(result.budget_exhausted());
    assert_eq!(result.iterations, 5);
    check_terminal_contract(&result, 1e-10);
}

#[test]
fn rosenbrock_converges_with_newton() {
    let f = SymbolicObjective::<f64>::parse("100*(y - x^2)^2 + (1 - x)^2", &["x", "y"]).unwrap();
    let x0 = DVector::from_vec(vec![-1.2, 1.0]);
    let criterion = StoppingCriterion::new(1e-8).unwrap();

    let result = global_newton().optimize(&f, &x0, &criterion).unwrap();

    assert!(result.converged);
    assert_relative_eq!(result.point, DVector::from_vec(vec![1.0, 1.0]), epsilon = 1e-6);
}

#[test]
fn converged_start_returns_without_iterating() {
    let cost = QuadraticObjective::<f64>::simple(2);
    let x0 = DVector::zeros(2);
    let criterion = StoppingCriterion::new(1e-6).unwrap();

    let result = global_newton().optimize(&cost, &x0, &criterion).unwrap();

    assert_eq!(result.iterations, 0);
    assert_eq!(result.hessian_evaluations, 0);
    assert_eq!(result.trajectory.len(), 1);
    assert_eq!(result.termination_reason, TerminationReason::Converged);
}

#[test]
fn singular_hessian_does_not_abort_the_run() {
    // f = (x + y)² + x⁴ has a singular Hessian at the origin and along x = 0
    let f = SymbolicObjective::<f64>::parse("(x + y)^2 + x^4", &["x", "y"]).unwrap();
    let x0 = DVector::from_vec(vec![0.0, 1.0]);
    let criterion = StoppingCriterion::new(1e-6).unwrap();

    let mut kinds = Vec::new();
    let mut callback = FnCallback::new(|info: &IterationInfo<'_, f64>| {
        kinds.push(info.direction);
        true
    });
    let result = global_newton()
        .optimize_with_callback(&f, &x0, &criterion, &mut callback)
        .unwrap();
    drop(callback);

    assert_eq!(kinds.first(), Some(&DirectionKind::SingularFallback));
    check_terminal_contract(&result, 1e-6);
}

#[test]
fn callback_can_stop_the_run() {
    let f = SymbolicObjective::<f64>::parse(QUARTIC, &["x1", "x2"]).unwrap();
    let x0 = DVector::from_vec(vec![1.0, 1.0]);
    let criterion = StoppingCriterion::new(1e-12).unwrap();

    let mut callback = FnCallback::new(|info: &IterationInfo<'_, f64>| info.iteration < 2);
    let result = gradient_descent()
        .optimize_with_callback(&f, &x0, &criterion, &mut callback)
        .unwrap();

    assert_eq!(result.termination_reason, TerminationReason::CallbackRequest);
    assert_eq!(result.iterations, 3);
    check_terminal_contract(&result, 1e-12);
}

#[test]
fn configuration_errors_are_reported_before_iterating() {
    let f = SymbolicObjective::<f64>::parse(QUARTIC, &["x1", "x2"]).unwrap();
    let criterion = StoppingCriterion::new(1e-5).unwrap();

    let err = gradient_descent()
        .optimize(&f, &DVector::from_vec(vec![1.0, 1.0, 1.0]), &criterion)
        .unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::InvalidConfiguration { ref parameter, .. } if parameter == "initial_point"
    ));

    let mut bad = criterion;
    bad.gradient_tolerance = -1.0;
    let err = global_newton()
        .optimize(&f, &DVector::from_vec(vec![1.0, 1.0]), &bad)
        .unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn undefined_objective_is_surfaced() {
    // the gradient is undefined at the start
    let f = SymbolicObjective::<f64>::parse("sqrt(x) + y^2", &["x", "y"]).unwrap();
    let x0 = DVector::from_vec(vec![0.0, 1.0]);
    let criterion = StoppingCriterion::new(1e-6).unwrap();

    let err = gradient_descent().optimize(&f, &x0, &criterion).unwrap_err();
    assert!(matches!(err, OptimizerError::NonNumericResult { .. }));
}

#[test]
fn counting_objective_matches_reported_evaluations() {
    let f = CountingObjective::new(SymbolicObjective::<f64>::parse(QUARTIC, &["x1", "x2"]).unwrap());
    let x0 = DVector::from_vec(vec![1.0, 1.0]);
    let criterion = StoppingCriterion::new(1e-5).unwrap();

    let result = global_newton().optimize(&f, &x0, &criterion).unwrap();

    assert_eq!(
        f.counts(),
        (
            result.function_evaluations,
            result.gradient_evaluations,
            result.hessian_evaluations
        )
    );
}
