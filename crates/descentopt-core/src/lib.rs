//! Core traits and types for line-search descent methods.
//!
//! This crate provides the building blocks shared by the descent drivers:
//! the objective interface, the Armijo backtracking line search, stopping
//! criteria, callbacks and the trajectory recorder.
//!
//! # Key Concepts
//!
//! - **Objective**: A smooth function f: ℝⁿ → ℝ with gradient and Hessian
//! - **Line search**: Picks a step size α along a descent direction d
//! - **Sufficient decrease**: f(x + αd) ≤ f(x) + γ α ∇f(x)ᵀd
//! - **Trajectory**: The ordered list of iterates a run visited
//!
//! # Modules
//!
//! - [`callback`]: Progress observers and cancellation
//! - [`error`]: Error types for optimization runs
//! - [`line_search`]: Armijo backtracking
//! - [`objective`]: Objective function interface
//! - [`optimizer`]: Optimizer trait, results and stopping criteria
//! - [`trajectory`]: Record of visited points
//! - [`types`]: Scalar trait and type aliases

pub mod callback;
pub mod error;
pub mod line_search;
pub mod objective;
pub mod optimizer;
pub mod trajectory;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use descentopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callback::{
        FnCallback, IterationInfo, LogProgressCallback, NoOpCallback, OptimizationCallback,
    };
    pub use crate::error::{OptimizerError, Result};
    pub use crate::line_search::{
        backtracking_armijo, BacktrackingLineSearch, LineSearch, LineSearchParams,
        LineSearchResult,
    };
    pub use crate::objective::{CountingObjective, Objective, QuadraticObjective};
    pub use crate::optimizer::{
        ConvergenceChecker, DirectionKind, OptimizationResult, Optimizer, StoppingCriterion,
        TerminationReason, DEFAULT_MAX_ITERATIONS,
    };
    pub use crate::trajectory::Trajectory;
    pub use crate::types::{DMatrix, DVector, Gradient, Hessian, Point, Scalar};
}
