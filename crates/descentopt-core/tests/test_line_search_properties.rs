//! Property tests for the Armijo backtracking line search.
//!
//! These tests verify the sufficient-decrease guarantee and the geometric
//! step sequence on randomly generated quadratics.

use descentopt_core::prelude::*;
use proptest::prelude::*;

/// Diagonal quadratic f(x) = ½ Σ dᵢ xᵢ²
fn diagonal_quadratic(diag: &[f64]) -> QuadraticObjective<f64> {
    let a = DMatrix::from_diagonal(&DVector::from_column_slice(diag));
    QuadraticObjective::new(a, DVector::zeros(diag.len()), 0.0).unwrap()
}

proptest! {
    #[test]
    fn armijo_condition_holds_at_accepted_step(
        diag in prop::collection::vec(0.1f64..50.0, 2..5),
        seed in prop::collection::vec(-5.0f64..5.0, 5),
        theta in 0.1f64..0.9,
        gamma in 0.01f64..0.9,
    ) {
        let n = diag.len();
        let cost = diagonal_quadratic(&diag);
        let x = DVector::from_column_slice(&seed[..n]);
        let g = cost.gradient(&x).unwrap();
        prop_assume!(g.norm() > 1e-8);

        let d = -&g;
        let params = LineSearchParams::new(theta, gamma).unwrap();
        let result = backtracking_armijo(&cost, &x, &d, &g, &params).unwrap();

        let f0 = cost.value(&x).unwrap();
        let slope = g.dot(&d);
        prop_assert!(result.new_value <= f0 + gamma * result.step_size * slope);
        prop_assert!(result.new_value < f0);
    }

    #[test]
    fn accepted_step_is_a_power_of_theta(
        diag in prop::collection::vec(0.1f64..50.0, 2..4),
        seed in prop::collection::vec(-3.0f64..3.0, 4),
        theta in 0.2f64..0.8,
    ) {
        let n = diag.len();
        let cost = diagonal_quadratic(&diag);
        let x = DVector::from_column_slice(&seed[..n]);
        let g = cost.gradient(&x).unwrap();
        prop_assume!(g.norm() > 1e-8);

        let params = LineSearchParams::new(theta, 0.1).unwrap();
        let result = backtracking_armijo(&cost, &x, &(-&g), &g, &params).unwrap();

        let expected = theta.powi(result.backtracks as i32);
        prop_assert!((result.step_size - expected).abs() <= 1e-12 * expected.max(1.0));
        prop_assert_eq!(result.function_evals, result.backtracks + 2);
    }
}

#[test]
fn previous_step_is_rejected_by_armijo() {
    // f(x) = ½ (10 x₁² + x₂²) from (1, 1): α = 1, ½, ¼ fail and ⅛ passes
    let cost = diagonal_quadratic(&[10.0, 1.0]);
    let x = DVector::from_vec(vec![1.0, 1.0]);
    let g = cost.gradient(&x).unwrap();
    let params = LineSearchParams::new(0.5, 0.1).unwrap();
    let result = backtracking_armijo(&cost, &x, &(-&g), &g, &params).unwrap();

    let f0 = cost.value(&x).unwrap();
    let slope = g.dot(&(-&g));
    let rejected = result.step_size / params.theta;
    let rejected_value = cost.value(&(&x - &g * rejected)).unwrap();
    assert!(rejected_value > f0 + params.gamma * rejected * slope);
}

#[test]
fn line_search_trait_object_matches_free_function() {
    let cost = diagonal_quadratic(&[4.0, 1.0, 0.5]);
    let x = DVector::from_vec(vec![1.0, -2.0, 3.0]);
    let g = cost.gradient(&x).unwrap();
    let d = -&g;
    let params = LineSearchParams::new(0.5, 0.2).unwrap();

    let searcher = BacktrackingLineSearch::new(params);
    let via_trait = searcher.search(&cost, &x, &d, &g).unwrap();
    let via_fn = backtracking_armijo(&cost, &x, &d, &g, &params).unwrap();

    assert_eq!(via_trait.step_size, via_fn.step_size);
    assert_eq!(via_trait.new_point, via_fn.new_point);
    assert_eq!(searcher.name(), "Armijo backtracking");
}
