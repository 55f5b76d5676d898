//! Property tests for the descent drivers.

use descentopt_core::prelude::*;
use descentopt_optim::{
    GlobalNewton, GlobalNewtonConfig, GradientDescent, GradientDescentConfig, NewtonSafeguard,
};
use proptest::prelude::*;

fn quadratic(diag: &[f64], shift: &[f64]) -> QuadraticObjective<f64> {
    let a = DMatrix::from_diagonal(&DVector::from_column_slice(diag));
    let b = -(&a * DVector::from_column_slice(shift));
    QuadraticObjective::new(a, b, 0.0).unwrap()
}

fn problem() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (2usize..6).prop_flat_map(|n| {
        (
            prop::collection::vec(1.0f64..8.0, n),
            prop::collection::vec(-5.0f64..5.0, n),
            prop::collection::vec(-5.0f64..5.0, n),
        )
    })
}

proptest! {
    #[test]
    fn values_decrease_along_the_trajectory((diag, shift, start) in problem()) {
        let cost = quadratic(&diag, &shift);
        let x0 = DVector::from_vec(start);
        let criterion = StoppingCriterion::new(1e-6).unwrap();

        let mut gd = GradientDescent::new(GradientDescentConfig::new(
            LineSearchParams::new(0.5, 0.1).unwrap(),
        ));
        let result = gd.optimize(&cost, &x0, &criterion).unwrap();

        prop_assert!(result.converged);
        for pair in result.trajectory.values().windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn newton_takes_one_step_on_convex_quadratics((diag, shift, start) in problem()) {
        let cost = quadratic(&diag, &shift);
        let x0 = DVector::from_vec(start);
        let criterion = StoppingCriterion::new(1e-6).unwrap();

        let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
            LineSearchParams::new(0.5, 0.1).unwrap(),
            NewtonSafeguard::new(1e-6, 0.1).unwrap(),
        ));
        let result = newton.optimize(&cost, &x0, &criterion).unwrap();

        prop_assert!(result.converged);
        prop_assert!(result.iterations <= 1);
        prop_assert_eq!(result.newton_steps, result.iterations);
        for (x, target) in result.point.iter().zip(&shift) {
            prop_assert!((x - target).abs() < 1e-6);
        }
    }
}
