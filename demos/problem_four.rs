//! Example: both descent drivers on a two-variable quartic
//!
//! Minimizes
//!
//! ```text
//! f(x1, x2) = 2 x1⁴ + (2/3) x1³ + x1² − 2 x1² x2 + (4/3) x2²
//! ```
//!
//! from (1, 1) with θ = 0.5, γ = 0.1 and a gradient tolerance of 1e-5, then
//! prints every iterate each method visited.
//!
//! Run with: cargo run --example problem_four

use descentopt::prelude::*;
use log::LevelFilter;

fn print_trajectory(name: &str, result: &OptimizationResult<f64>) {
    println!("{name}: {}", result.termination_reason);
    println!(
        "  iterations = {}, newton steps = {}, f evals = {}, |grad| = {:.3e}",
        result.iterations, result.newton_steps, result.function_evaluations, result.gradient_norm
    );
    for (k, (point, value)) in result.trajectory.iter().enumerate() {
        println!(
            "  {k:>3}  x = ({:>12.8}, {:>12.8})  f = {value:.10}",
            point[0], point[1]
        );
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let f = SymbolicObjective::<f64>::parse(
        "2*x1^4 + (2/3)*x1^3 + x1^2 - 2*x1^2*x2 + (4/3)*x2^2",
        &["x1", "x2"],
    )?;
    println!("f(x1, x2) = {}", f.expr());
    for (var, partial) in f.variables().iter().zip(f.gradient_exprs()) {
        println!("  ∂f/∂{var} = {partial}");
    }
    println!();

    let params = LineSearchParams::new(0.5, 0.1)?;
    let criterion = StoppingCriterion::new(1e-5)?;
    let x0 = DVector::from_vec(vec![1.0, 1.0]);

    let mut gd = GradientDescent::new(GradientDescentConfig::new(params));
    let gd_result = gd.optimize(&f, &x0, &criterion)?;
    print_trajectory(gd.name(), &gd_result);

    let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
        params,
        NewtonSafeguard::new(1e-6, 0.1)?,
    ));
    let newton_result =
        newton.optimize_with_callback(&f, &x0, &criterion, &mut LogProgressCallback::new(1))?;
    print_trajectory(newton.name(), &newton_result);

    Ok(())
}
