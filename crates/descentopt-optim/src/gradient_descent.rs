//! Gradient descent with Armijo backtracking.
//!
//! Each iteration moves along the steepest-descent direction d_k = −∇f(x_k)
//! with a step chosen by the backtracking line search:
//!
//! ```text
//! x_{k+1} = x_k − α_k ∇f(x_k),   α_k ∈ {1, θ, θ², …}
//! ```
//!
//! Convergence is linear, with a rate governed by the conditioning of the
//! Hessian at the minimizer.

use crate::driver::{minimize, DirectionRule};
use descentopt_core::{
    callback::OptimizationCallback,
    error::Result,
    line_search::{BacktrackingLineSearch, LineSearchParams},
    objective::Objective,
    optimizer::{OptimizationResult, Optimizer, StoppingCriterion},
    types::{DVector, Scalar},
};

/// Configuration for gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Armijo parameters (θ, γ)
    pub line_search: LineSearchParams<T>,
}

impl<T> GradientDescentConfig<T>
where
    T: Scalar,
{
    /// Creates a configuration with the given line-search parameters.
    pub fn new(line_search: LineSearchParams<T>) -> Self {
        Self { line_search }
    }

    /// Checks the line-search parameters.
    pub fn validate(&self) -> Result<()> {
        self.line_search.validate()
    }
}

/// Steepest descent driver.
#[derive(Debug, Clone)]
pub struct GradientDescent<T>
where
    T: Scalar,
{
    config: GradientDescentConfig<T>,
    line_search: BacktrackingLineSearch<T>,
}

impl<T> GradientDescent<T>
where
    T: Scalar,
{
    /// Creates a new gradient descent optimizer.
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self {
            line_search: BacktrackingLineSearch::new(config.line_search),
            config,
        }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for GradientDescent<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Gradient Descent"
    }

    fn optimize_with_callback<O, C>(
        &mut self,
        objective: &O,
        initial_point: &DVector<T>,
        criterion: &StoppingCriterion<T>,
        callback: &mut C,
    ) -> Result<OptimizationResult<T>>
    where
        O: Objective<T>,
        C: OptimizationCallback<T>,
    {
        self.config.validate()?;
        minimize(
            DirectionRule::SteepestDescent,
            &self.line_search,
            objective,
            initial_point,
            criterion,
            callback,
        )
    }
}
