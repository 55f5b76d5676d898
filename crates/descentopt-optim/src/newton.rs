//! Globalized Newton method.
//!
//! Each iteration solves the Newton system H(x_k) s = −∇f(x_k) and keeps s
//! only if it passes the curvature test of [`select_direction`]:
//!
//! ```text
//! −⟨∇f(x_k), s⟩ ≥ γ₁ · min(1, ‖s‖^γ₂) · ‖s‖²
//! ```
//!
//! Otherwise, or when the Hessian is singular, the step falls back to
//! −∇f(x_k). Either direction is then backtracked with the Armijo rule.
//!
//! Away from the minimizer the method behaves like gradient descent; once
//! the Hessian is positive definite and the unit step is accepted, the
//! iterates converge quadratically.
//!
//! [`select_direction`]: crate::direction::select_direction

use crate::{
    direction::NewtonSafeguard,
    driver::{minimize, DirectionRule},
};
use descentopt_core::{
    callback::OptimizationCallback,
    error::Result,
    line_search::{BacktrackingLineSearch, LineSearchParams},
    objective::Objective,
    optimizer::{OptimizationResult, Optimizer, StoppingCriterion},
    types::{DVector, Scalar},
};

/// Configuration for the globalized Newton method
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalNewtonConfig<T>
where
    T: Scalar,
{
    /// Armijo parameters (θ, γ)
    pub line_search: LineSearchParams<T>,
    /// Curvature-test parameters (γ₁, γ₂)
    pub safeguard: NewtonSafeguard<T>,
}

impl<T> GlobalNewtonConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration.
    pub fn new(line_search: LineSearchParams<T>, safeguard: NewtonSafeguard<T>) -> Self {
        Self {
            line_search,
            safeguard,
        }
    }

    /// Checks both parameter sets.
    pub fn validate(&self) -> Result<()> {
        self.line_search.validate()?;
        self.safeguard.validate()
    }
}

/// Newton driver with a steepest-descent safeguard.
#[derive(Debug, Clone)]
pub struct GlobalNewton<T>
where
    T: Scalar,
{
    config: GlobalNewtonConfig<T>,
    line_search: BacktrackingLineSearch<T>,
}

impl<T> GlobalNewton<T>
where
    T: Scalar,
{
    /// Create a new globalized Newton optimizer
    pub fn new(config: GlobalNewtonConfig<T>) -> Self {
        Self {
            line_search: BacktrackingLineSearch::new(config.line_search),
            config,
        }
    }

    /// Returns the optimizer configuration.
    pub fn config(&self) -> &GlobalNewtonConfig<T> {
        &self.config
    }
}

impl<T> Optimizer<T> for GlobalNewton<T>
where
    T: Scalar,
{
    fn name(&self) -> &str {
        "Global Newton"
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
            DirectionRule::SafeguardedNewton(self.config.safeguard),
            &self.line_search,
            objective,
            initial_point,
            criterion,
            callback,
        )
    }
}
