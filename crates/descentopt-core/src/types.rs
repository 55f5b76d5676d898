//! Type definitions and aliases for descent optimization.
//!
//! This module provides the scalar trait shared by every crate of the
//! workspace together with the vector and matrix aliases used for points,
//! gradients and Hessians.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the necessary numeric traits required by the
/// symbolic evaluator and the descent algorithms.
///
/// `RealField` and `Float` both provide methods such as `sqrt`, `abs`,
/// `powf` and `min`; call them as `<T as Float>::sqrt(x)` to avoid
/// ambiguity.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display and error context).
    ///
    /// Values that cannot be represented are reported as NaN.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).unwrap_or(f64::NAN)
    }

    /// Returns true if the value is neither infinite nor NaN.
    fn is_real(self) -> bool {
        <Self as Float>::is_finite(self)
    }
}

impl Scalar for f32 {}

impl Scalar for f64 {}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// A point in ℝⁿ, ordered like the objective's variable list.
pub type Point<T> = DVector<T>;

/// Gradient ∇f(x) at a point.
pub type Gradient<T> = DVector<T>;

/// Hessian ∇²f(x) at a point (n×n, symmetric).
pub type Hessian<T> = DMatrix<T>;

/// Returns true if every component of the vector is finite.
pub fn all_finite<T: Scalar>(vector: &DVector<T>) -> bool {
    vector.iter().all(|v| v.is_real())
}
