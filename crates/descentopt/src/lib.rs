//! # descentopt
//!
//! Unconstrained minimization of smooth functions of several variables with
//! line-search descent methods.
//!
//! The crate ties together three pieces:
//!
//! - [`symbolic`]: expressions, exact symbolic gradients and Hessians
//! - [`base`]: the objective seam, Armijo backtracking, stopping rules,
//!   trajectories and callbacks
//! - [`optim`]: gradient descent and the globalized Newton method
//!
//! ## Quick Start
//!
//! ```rust
//! use descentopt::prelude::*;
//!
//! let f = SymbolicObjective::<f64>::parse(
//!     "2*x1^4 + (2/3)*x1^3 + x1^2 - 2*x1^2*x2 + (4/3)*x2^2",
//!     &["x1", "x2"],
//! )
//! .unwrap();
//!
//! let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
//!     LineSearchParams::new(0.5, 0.1).unwrap(),
//!     NewtonSafeguard::new(1e-6, 0.1).unwrap(),
//! ));
//! let x0 = DVector::from_vec(vec![1.0, 1.0]);
//! let criterion = StoppingCriterion::new(1e-5).unwrap();
//!
//! let result = newton.optimize(&f, &x0, &criterion).unwrap();
//! assert!(result.converged);
//! for (point, value) in result.trajectory.iter() {
//!     println!("{:?} -> {value}", point.as_slice());
//! }
//! ```
//!
//! ## Features
//!
//! - `serde`: serialization of configurations, results and trajectories

pub use descentopt_core as base;
pub use descentopt_optim as optim;
pub use descentopt_symbolic as symbolic;

pub use nalgebra;

/// Prelude module for convenient imports
pub mod prelude {
    pub use descentopt_core::prelude::*;
    pub use descentopt_optim::{
        GlobalNewton, GlobalNewtonConfig, GradientDescent, GradientDescentConfig,
        NewtonSafeguard, SearchDirection,
    };
    pub use descentopt_symbolic::{symbols, Expr, Func, Symbol, SymbolicObjective};
}
