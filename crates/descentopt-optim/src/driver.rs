//! Iteration loop shared by the descent drivers.

use crate::direction::{select_direction, NewtonSafeguard, SearchDirection};
use descentopt_core::{
    callback::{IterationInfo, OptimizationCallback},
    error::Result,
    line_search::{BacktrackingLineSearch, LineSearch},
    objective::Objective,
    optimizer::{
        validate_initial_point, ConvergenceChecker, DirectionKind, OptimizationResult,
        StoppingCriterion, TerminationReason,
    },
    trajectory::Trajectory,
    types::{DVector, Scalar},
};
use std::time::Instant;

/// How a driver picks d_k.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DirectionRule<T>
where
    T: Scalar,
{
    /// d_k = −∇f(x_k)
    SteepestDescent,
    /// Newton step guarded by the curvature test
    SafeguardedNewton(NewtonSafeguard<T>),
}

/// Runs the descent state machine from `initial_point` until the gradient
/// tolerance is met, the budget runs out, or `callback` asks to stop.
pub(crate) fn minimize<T, O, C>(
    rule: DirectionRule<T>,
    line_search: &BacktrackingLineSearch<T>,
    objective: &O,
    initial_point: &DVector<T>,
    criterion: &StoppingCriterion<T>,
    callback: &mut C,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    O: Objective<T>,
    C: OptimizationCallback<T>,
{
    criterion.validate()?;
    line_search.params().validate()?;
    if let DirectionRule::SafeguardedNewton(safeguard) = &rule {
        safeguard.validate()?;
    }
    validate_initial_point(objective, initial_point)?;

    let start_time = Instant::now();

    let mut point = initial_point.clone();
    let mut value = objective.value(&point)?;
    let mut gradient = objective.gradient(&point)?;
    let mut function_evaluations = 1;
    let mut gradient_evaluations = 1;
    let mut hessian_evaluations = 0;
    let mut newton_steps = 0;
    let mut iteration = 0;

    let mut trajectory = Trajectory::new(point.clone(), value);
    callback.on_optimization_start(&point, value)?;

    let termination_reason = loop {
        let gradient_norm = gradient.norm();
        if let Some(reason) = ConvergenceChecker::check(gradient_norm, iteration, criterion)? {
            break reason;
        }

        let search_direction = match &rule {
            DirectionRule::SteepestDescent => SearchDirection::steepest_descent(&gradient),
            DirectionRule::SafeguardedNewton(safeguard) => {
                let hessian = objective.hessian(&point)?;
                hessian_evaluations += 1;
                select_direction(&gradient, &hessian, safeguard)?
            }
        };
        let SearchDirection { direction, kind } = search_direction;

        let slope = gradient.dot(&direction);
        let step = line_search.search_with_deriv(objective, &point, value, &direction, slope)?;
        function_evaluations += step.function_evals;
        let step_size = step.step_size;
        let unit_step = step.is_unit_step();

        point = step.new_point;
        value = step.new_value;
        trajectory.push(point.clone(), value);

        gradient = objective.gradient(&point)?;
        gradient_evaluations += 1;

        if kind == DirectionKind::Newton {
            newton_steps += 1;
            log::debug!("using newton's method at iteration {iteration}");
            if unit_step {
                log::debug!("unit step accepted at iteration {iteration}");
            }
        }
        log::debug!(
            "iteration {iteration}: {kind}, alpha = {step_size}, f = {value}, |grad| = {}",
            gradient.norm()
        );

        let info = IterationInfo {
            iteration,
            point: &point,
            value,
            gradient_norm: gradient.norm(),
            step_size,
            direction: kind,
            elapsed: start_time.elapsed(),
        };
        iteration += 1;

        if !callback.on_iteration_end(&info)? {
            break TerminationReason::CallbackRequest;
        }
    };

    let duration = start_time.elapsed();
    callback.on_optimization_end(iteration, value, duration)?;

    let gradient_norm = gradient.norm();
    let converged = gradient_norm <= criterion.gradient_tolerance;
    match termination_reason {
        TerminationReason::MaxIterations => log::warn!(
            "iteration budget of {} exhausted, |grad| = {gradient_norm}",
            criterion.max_iterations
        ),
        reason => log::info!("{reason} after {iteration} iterations, f = {value}"),
    }

    Ok(OptimizationResult {
        point,
        value,
        gradient_norm,
        iterations: iteration,
        function_evaluations,
        gradient_evaluations,
        hessian_evaluations,
        newton_steps,
        duration,
        termination_reason,
        converged,
        trajectory,
    })
}
