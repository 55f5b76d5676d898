//! Example: gradient descent versus globalized Newton on Rosenbrock
//!
//! The Newton driver reports which direction it used at every iteration,
//! showing the steepest-descent fallback far from the minimizer and pure
//! Newton steps near it.
//!
//! Run with: cargo run --example compare_drivers

use descentopt::prelude::*;

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let f = SymbolicObjective::<f64>::parse("100*(y - x^2)^2 + (1 - x)^2", &["x", "y"])?;
    let x0 = DVector::from_vec(vec![-1.2, 1.0]);
    let params = LineSearchParams::new(0.5, 1e-4)?;
    let criterion = StoppingCriterion::new(1e-8)?.with_max_iterations(20_000);

    let mut gd = GradientDescent::new(GradientDescentConfig::new(params));
    let gd_result = gd.optimize(&f, &x0, &criterion)?;

    let mut kinds = Vec::new();
    let mut record = FnCallback::new(|info: &IterationInfo<'_, f64>| {
        kinds.push((info.direction, info.step_size));
        true
    });
    let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
        params,
        NewtonSafeguard::new(1e-6, 0.1)?,
    ));
    let newton_result = newton.optimize_with_callback(&f, &x0, &criterion, &mut record)?;
    drop(record);

    println!("{:<18} {:>10} {:>10} {:>14}", "driver", "iters", "f evals", "f*");
    for (name, result) in [(gd.name(), &gd_result), (newton.name(), &newton_result)] {
        println!(
            "{name:<18} {:>10} {:>10} {:>14.6e}",
            result.iterations, result.function_evaluations, result.value
        );
    }

    println!("\nNewton directions:");
    for (k, (kind, alpha)) in kinds.iter().enumerate() {
        println!("  {k:>3}  {kind:<26} alpha = {alpha}");
    }

    Ok(())
}
