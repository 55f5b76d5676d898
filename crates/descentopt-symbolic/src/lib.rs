//! Symbolic expressions and exact derivatives.
//!
//! This crate supplies the objectives the descent drivers minimize when the
//! function is known in closed form: an expression tree with symbolic
//! differentiation, substitution-based evaluation and a small infix parser.
//!
//! # Example
//!
//! ```rust
//! use descentopt_core::prelude::*;
//! use descentopt_symbolic::SymbolicObjective;
//!
//! let f = SymbolicObjective::<f64>::parse("x^2 + 3*x*y + y^4", &["x", "y"]).unwrap();
//! let point = DVector::from_vec(vec![1.0, 2.0]);
//!
//! assert_eq!(f.value(&point).unwrap(), 23.0);
//! assert_eq!(f.gradient(&point).unwrap(), DVector::from_vec(vec![8.0, 35.0]));
//! ```
//!
//! # Modules
//!
//! - [`expr`]: Expression tree, symbols and simplifying constructors
//! - [`diff`]: Symbolic differentiation
//! - [`eval`]: Numeric evaluation by substitution
//! - [`parse`]: Infix parser
//! - [`objective`]: [`SymbolicObjective`] and the free derivative functions
//! - [`error`]: Expression errors

pub mod diff;
pub mod error;
pub mod eval;
pub mod expr;
pub mod objective;
pub mod parse;

pub use error::{ExprError, Result};
pub use expr::{symbols, Expr, Func, Symbol, MAX_DEPTH};
pub use objective::{gradient, hessian, SymbolicObjective};
