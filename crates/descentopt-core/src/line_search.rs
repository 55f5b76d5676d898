//! Armijo backtracking line search.
//!
//! Given a point x, a search direction d and the gradient ∇f(x), the line
//! search picks a step length α from the geometric sequence
//! {1, θ, θ², …} such that the sufficient-decrease (Armijo) condition holds:
//!
//! ```text
//! f(x + α d) ≤ f(x) + γ α ⟨∇f(x), d⟩
//! ```
//!
//! where 0 < θ < 1 is the shrink factor and 0 < γ < 1 controls how much
//! decrease is demanded.
//!
//! # Sufficient decrease on every trial
//!
//! The slope term γ α ⟨∇f(x), d⟩ is always scaled by the *current* trial α,
//! including the very first trial α = 1. Both drivers share this single
//! formulation.
//!
//! # Termination
//!
//! For a true descent direction (⟨∇f(x), d⟩ < 0) and an objective bounded
//! below along d, the search terminates after finitely many shrinks. There is
//! no cap on the number of shrinks: the search only gives up when the trial
//! step underflows to zero, or immediately when d is not a descent direction.
//!
//! # Examples
//!
//! ```rust
//! use descentopt_core::prelude::*;
//!
//! let cost = QuadraticObjective::<f64>::simple(2);
//! let x = DVector::from_vec(vec![1.0, 1.0]);
//! let g = cost.gradient(&x).unwrap();
//! let d = -&g;
//!
//! let params = LineSearchParams::new(0.5, 0.1).unwrap();
//! let result = backtracking_armijo(&cost, &x, &d, &g, &params).unwrap();
//! assert_eq!(result.step_size, 1.0);
//! ```

use crate::{
    error::{OptimizerError, Result},
    objective::Objective,
    types::{DVector, Scalar},
};
use log::trace;
use std::fmt::Debug;

/// Parameters (θ, γ) of the Armijo backtracking rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSearchParams<T>
where
    T: Scalar,
{
    /// Shrink factor θ ∈ (0,1): α_{i+1} = θ α_i when the Armijo condition fails
    pub theta: T,

    /// Sufficient-decrease constant γ ∈ (0,1) in
    /// f(x + αd) ≤ f(x) + γα⟨∇f(x), d⟩
    pub gamma: T,
}

impl<T> LineSearchParams<T>
where
    T: Scalar,
{
    /// Creates validated line search parameters.
    pub fn new(theta: T, gamma: T) -> Result<Self> {
        let params = Self { theta, gamma };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameters against 0 < θ < 1 and 0 < γ < 1.
    ///
    /// NaN values fail both comparisons and are rejected too.
    pub fn validate(&self) -> Result<()> {
        if !(self.theta > T::zero() && self.theta < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "shrink factor must lie in (0, 1)",
                "theta",
                self.theta.to_string(),
            ));
        }

        if !(self.gamma > T::zero() && self.gamma < T::one()) {
            return Err(OptimizerError::invalid_configuration(
                "sufficient-decrease constant must lie in (0, 1)",
                "gamma",
                self.gamma.to_string(),
            ));
        }

        Ok(())
    }
}

/// Result of a backtracking line search.
#[derive(Debug, Clone)]
pub struct LineSearchResult<T>
where
    T: Scalar,
{
    /// The accepted step size α = θᵏ
    pub step_size: T,

    /// The new point x + α d
    pub new_point: DVector<T>,

    /// The objective value f(x + α d) at the new point
    pub new_value: T,

    /// Number of shrinks k performed (α = θᵏ)
    pub backtracks: usize,

    /// Total number of objective evaluations performed
    pub function_evals: usize,
}

impl<T> LineSearchResult<T>
where
    T: Scalar,
{
    /// Returns true if the full step α = 1 was accepted.
    pub fn is_unit_step(&self) -> bool {
        self.backtracks == 0
    }
}

/// Interface for step-length selection along a search direction.
pub trait LineSearch<T>: Debug
where
    T: Scalar,
{
    /// Finds a step along `direction` from `point`.
    ///
    /// Computes f(x) and the directional derivative ⟨∇f(x), d⟩ and
    /// delegates to [`search_with_deriv`](LineSearch::search_with_deriv).
    fn search<O>(
        &self,
        objective: &O,
        point: &DVector<T>,
        direction: &DVector<T>,
        gradient: &DVector<T>,
    ) -> Result<LineSearchResult<T>>
    where
        O: Objective<T>,
    {
        let value = objective.value(point)?;
        let directional_deriv = gradient.dot(direction);
        self.search_with_deriv(objective, point, value, direction, directional_deriv)
            .map(|mut result| {
                result.function_evals += 1;
                result
            })
    }

    /// Line search with f(x) and ⟨∇f(x), d⟩ already known.
    fn search_with_deriv<O>(
        &self,
        objective: &O,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        directional_deriv: T,
    ) -> Result<LineSearchResult<T>>
    where
        O: Objective<T>;

    /// Returns a human-readable name identifying the line search algorithm.
    fn name(&self) -> &str;
}

/// Backtracking line search with the Armijo sufficient decrease condition.
///
/// Starting with α = 1:
/// 1. **Test condition**: f(x + α d) ≤ f(x) + γ α ⟨∇f(x), d⟩
/// 2. **If satisfied**: accept α
/// 3. **If not**: reduce α ← θα and repeat
///
/// Trial points where the objective is undefined (a `NonNumericResult`) are
/// treated like a failed Armijo test and shrunk away from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktrackingLineSearch<T>
where
    T: Scalar,
{
    params: LineSearchParams<T>,
}

impl<T> BacktrackingLineSearch<T>
where
    T: Scalar,
{
    /// Creates a new backtracking line search.
    pub fn new(params: LineSearchParams<T>) -> Self {
        Self { params }
    }

    /// Returns the (θ, γ) parameters.
    pub fn params(&self) -> &LineSearchParams<T> {
        &self.params
    }
}

impl<T> LineSearch<T> for BacktrackingLineSearch<T>
where
    T: Scalar,
{
    fn search_with_deriv<O>(
        &self,
        objective: &O,
        point: &DVector<T>,
        value: T,
        direction: &DVector<T>,
        directional_deriv: T,
    ) -> Result<LineSearchResult<T>>
    where
        O: Objective<T>,
    {
        self.params.validate()?;

        if !(directional_deriv < T::zero()) {
            return Err(OptimizerError::line_search_failed(
                format!(
                    "search direction is not a descent direction (slope = {directional_deriv})"
                ),
                0,
                1.0,
                Scalar::to_f64(value),
            ));
        }

        let LineSearchParams { theta, gamma } = self.params;
        let mut alpha = T::one();
        let mut backtracks = 0;
        let mut function_evals = 0;

        loop {
            let trial = point + direction * alpha;
            function_evals += 1;

            let threshold = value + gamma * alpha * directional_deriv;
            match objective.value(&trial) {
                Ok(trial_value) if trial_value <= threshold => {
                    trace!("armijo accepted alpha = {alpha} after {backtracks} backtracks");
                    return Ok(LineSearchResult {
                        step_size: alpha,
                        new_point: trial,
                        new_value: trial_value,
                        backtracks,
                        function_evals,
                    });
                }
                Ok(_) => {}
                Err(OptimizerError::NonNumericResult { reason }) => {
                    trace!("trial step alpha = {alpha} left the domain: {reason}");
                }
                Err(err) => return Err(err),
            }

            alpha = theta * alpha;
            backtracks += 1;

            if alpha <= T::zero() {
                return Err(OptimizerError::line_search_failed(
                    "step size underflowed to zero",
                    backtracks,
                    Scalar::to_f64(alpha),
                    Scalar::to_f64(value),
                ));
            }
        }
    }

    fn name(&self) -> &str {
        "Armijo backtracking"
    }
}

/// Standalone Armijo backtracking search.
///
/// Finds the largest α ∈ {1, θ, θ², …} with
/// f(x_k + α d_k) ≤ f(x_k) + γ α ⟨∇f(x_k), d_k⟩. The function is pure: every
/// quantity it needs is passed explicitly.
///
/// # Arguments
///
/// * `objective` - Objective f to decrease
/// * `point` - Current iterate x_k
/// * `direction` - Descent direction d_k
/// * `gradient` - Gradient ∇f(x_k) at the current iterate
/// * `params` - Shrink factor θ and sufficient-decrease constant γ
pub fn backtracking_armijo<T, O>(
    objective: &O,
    point: &DVector<T>,
    direction: &DVector<T>,
    gradient: &DVector<T>,
    params: &LineSearchParams<T>,
) -> Result<LineSearchResult<T>>
where
    T: Scalar,
    O: Objective<T>,
{
    BacktrackingLineSearch::new(*params).search(objective, point, direction, gradient)
}
