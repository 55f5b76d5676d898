//! Core optimizer traits and types.
//!
//! Every driver in this workspace runs the same state machine:
//!
//! ```text
//! INITIALIZED ──▶ ITERATING ──▶ CONVERGED
//!                     │
//!                     └───────▶ BUDGET_EXHAUSTED
//! ```
//!
//! 1. **Initialization**: start at x₀ and compute ∇f(x₀) once
//! 2. **Search direction**: pick d_k (−∇f(x_k), or a safeguarded Newton step)
//! 3. **Line search**: find α_k by Armijo backtracking
//! 4. **Update**: x_{k+1} = x_k + α_k d_k, recorded in the trajectory
//! 5. **Convergence**: stop once ‖∇f(x_k)‖ ≤ tol or the iteration cap is hit
//!
//! Exhausting the iteration budget is *not* an error. The run still returns
//! an [`OptimizationResult`]; its [`TerminationReason`] and `converged` flag
//! tell the caller the tolerance was never met.
//!
//! # Example
//!
//! ```rust
//! # use descentopt_core::prelude::*;
//! let criterion = StoppingCriterion::new(1e-6)
//!     .unwrap()
//!     .with_max_iterations(500);
//!
//! assert_eq!(criterion.max_iterations, 500);
//! assert_eq!(
//!     ConvergenceChecker::check(1e-7, 3, &criterion).unwrap(),
//!     Some(TerminationReason::Converged)
//! );
//! ```

use crate::{
    callback::{NoOpCallback, OptimizationCallback},
    error::{OptimizerError, Result},
    objective::Objective,
    trajectory::Trajectory,
    types::{DVector, Scalar},
};
use std::fmt::{self, Debug};
use std::time::Duration;

/// Iteration budget shared by both drivers.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Result of an optimization run.
///
/// # Mathematical Interpretation
///
/// - **point**: The final iterate x_k
/// - **value**: The objective value f(x_k) at the final point
/// - **gradient_norm**: ‖∇f(x_k)‖ measuring first-order optimality
/// - **trajectory**: every accepted iterate, x₀ first and x_k last
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The final point x_k found by the optimizer
    pub point: DVector<T>,

    /// The objective value f(x_k) at the final point
    pub value: T,

    /// The gradient norm ‖∇f(x_k)‖ at the final point
    pub gradient_norm: T,

    /// Number of major iterations performed
    pub iterations: usize,

    /// Total number of objective evaluations f(x)
    pub function_evaluations: usize,

    /// Total number of gradient evaluations ∇f(x)
    pub gradient_evaluations: usize,

    /// Total number of Hessian evaluations ∇²f(x)
    pub hessian_evaluations: usize,

    /// Number of iterations that used the Newton direction
    pub newton_steps: usize,

    /// Wall-clock time elapsed during optimization
    pub duration: Duration,

    /// Reason for algorithm termination
    pub termination_reason: TerminationReason,

    /// True if ‖∇f(x_k)‖ ≤ tol at the returned point
    pub converged: bool,

    /// Visited points and values in order
    pub trajectory: Trajectory<T>,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Returns true if the iteration budget ran out before convergence.
    pub fn budget_exhausted(&self) -> bool {
        self.termination_reason == TerminationReason::MaxIterations
    }
}

/// Reasons for optimization algorithm termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// First-order condition satisfied: ‖∇f(x)‖ ≤ tol
    Converged,
    /// Maximum iteration count exhausted without convergence
    MaxIterations,
    /// Progress callback requested early termination
    CallbackRequest,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::MaxIterations => write!(f, "iteration budget exhausted"),
            Self::CallbackRequest => write!(f, "stopped by callback"),
        }
    }
}

/// Kind of search direction taken at an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionKind {
    /// Steepest descent d = −∇f(x)
    SteepestDescent,
    /// Newton step d = s with H s = −∇f(x)
    Newton,
    /// Steepest descent taken because the Newton system was singular
    SingularFallback,
}

impl fmt::Display for DirectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SteepestDescent => "gradient step",
            Self::Newton => "newton step",
            Self::SingularFallback => "gradient step (singular hessian)",
        };
        f.pad(label)
    }
}

/// Stopping criteria for the descent drivers.
///
/// - **gradient_tolerance**: stop once ‖∇f(x)‖ ≤ ε
/// - **max_iterations**: upper bound on major iterations (1000 by default)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingCriterion<T>
where
    T: Scalar,
{
    /// Tolerance for the gradient norm: ‖∇f(x)‖ ≤ ε
    pub gradient_tolerance: T,

    /// Maximum number of major optimization iterations
    pub max_iterations: usize,
}

impl<T> StoppingCriterion<T>
where
    T: Scalar,
{
    /// Creates a criterion with the given gradient tolerance and the default
    /// budget of [`DEFAULT_MAX_ITERATIONS`].
    pub fn new(gradient_tolerance: T) -> Result<Self> {
        let criterion = Self {
            gradient_tolerance,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        };
        criterion.validate()?;
        Ok(criterion)
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Checks that the tolerance is a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !(self.gradient_tolerance > T::zero() && self.gradient_tolerance.is_real()) {
            return Err(OptimizerError::invalid_configuration(
                "gradient tolerance must be positive and finite",
                "gradient_tolerance",
                self.gradient_tolerance.to_string(),
            ));
        }
        Ok(())
    }
}

/// Evaluates the stopping criteria of the shared state machine.
#[derive(Debug)]
pub struct ConvergenceChecker;

impl ConvergenceChecker {
    /// Checks if any stopping criterion has been met.
    ///
    /// The gradient test comes first, so a run whose last allowed iteration
    /// lands inside the tolerance reports `Converged`.
    ///
    /// # Errors
    ///
    /// Returns `NonNumericResult` if the gradient norm is NaN or infinite.
    pub fn check<T>(
        gradient_norm: T,
        iteration: usize,
        criterion: &StoppingCriterion<T>,
    ) -> Result<Option<TerminationReason>>
    where
        T: Scalar,
    {
        if !gradient_norm.is_real() {
            return Err(OptimizerError::non_numeric(format!(
                "gradient norm is {gradient_norm} at iteration {iteration}"
            )));
        }

        if gradient_norm <= criterion.gradient_tolerance {
            return Ok(Some(TerminationReason::Converged));
        }

        if iteration >= criterion.max_iterations {
            return Ok(Some(TerminationReason::MaxIterations));
        }

        Ok(None)
    }
}

/// Common interface of the descent drivers.
///
/// The trait is not generic over the objective; its methods are, so a single
/// configured optimizer can be run on any number of objectives.
pub trait Optimizer<T>: Debug
where
    T: Scalar,
{
    /// Returns a human-readable name identifying the optimization algorithm.
    fn name(&self) -> &str;

    /// Minimizes `objective` from `initial_point`, reporting progress to
    /// `callback`.
    ///
    /// # Errors
    ///
    /// Returns errors for:
    /// - Invalid configuration or an initial point of the wrong length
    /// - Objectives or derivatives that are undefined at an iterate
    /// - Callback failures
    fn optimize_with_callback<O, C>(
        &mut self,
        objective: &O,
        initial_point: &DVector<T>,
        criterion: &StoppingCriterion<T>,
        callback: &mut C,
    ) -> Result<OptimizationResult<T>>
    where
        O: Objective<T>,
        C: OptimizationCallback<T>;

    /// Minimizes `objective` from `initial_point` without observation.
    fn optimize<O>(
        &mut self,
        objective: &O,
        initial_point: &DVector<T>,
        criterion: &StoppingCriterion<T>,
    ) -> Result<OptimizationResult<T>>
    where
        O: Objective<T>,
    {
        self.optimize_with_callback(objective, initial_point, criterion, &mut NoOpCallback)
    }
}

/// Checks that the initial point matches the objective's dimension.
///
/// A length mismatch is reported as an invalid configuration: the run would
/// otherwise substitute coordinates into the wrong variables.
pub fn validate_initial_point<T, O>(objective: &O, initial_point: &DVector<T>) -> Result<()>
where
    T: Scalar,
    O: Objective<T>,
{
    if initial_point.len() != objective.dimension() {
        return Err(OptimizerError::invalid_configuration(
            format!(
                "initial point has {} coordinates but the objective has {} variables",
                initial_point.len(),
                objective.dimension()
            ),
            "initial_point",
            format!("{initial_point:?}"),
        ));
    }
    Ok(())
}
