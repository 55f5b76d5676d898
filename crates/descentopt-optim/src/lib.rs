//! Descent drivers for smooth unconstrained minimization.
//!
//! This crate provides the two line-search methods built on
//! `descentopt-core`, together with the direction selector they use.
//!
//! # Available Optimizers
//!
//! - **Gradient Descent**: steepest descent with Armijo backtracking
//! - **Global Newton**: Newton steps guarded by a curvature test, falling
//!   back to steepest descent, with Armijo backtracking
//!
//! # Examples
//!
//! ```rust
//! use descentopt_core::prelude::*;
//! use descentopt_optim::{GlobalNewton, GlobalNewtonConfig, NewtonSafeguard};
//!
//! let mut newton = GlobalNewton::new(GlobalNewtonConfig::new(
//!     LineSearchParams::new(0.5, 0.1).unwrap(),
//!     NewtonSafeguard::new(1e-4, 0.5).unwrap(),
//! ));
//!
//! let cost = QuadraticObjective::<f64>::simple(2);
//! let x0 = DVector::from_vec(vec![3.0, -4.0]);
//! let criterion = StoppingCriterion::new(1e-8).unwrap();
//!
//! let result = newton.optimize(&cost, &x0, &criterion).unwrap();
//! assert!(result.converged);
//! assert_eq!(result.trajectory.first().map(|(p, _)| p), Some(&x0));
//! ```

pub mod direction;
mod driver;
pub mod gradient_descent;
pub mod newton;

// Re-export main optimizers for convenience
pub use direction::{select_direction, solve_newton_system, NewtonSafeguard, SearchDirection};
pub use gradient_descent::{GradientDescent, GradientDescentConfig};
pub use newton::{GlobalNewton, GlobalNewtonConfig};
