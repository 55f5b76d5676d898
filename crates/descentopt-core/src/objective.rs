//! Objective function interface for descent optimization.
//!
//! The drivers only need four things from an objective f: ℝⁿ → ℝ: its
//! dimension, its value, its gradient and its Hessian at a point. This
//! module defines the [`Objective`] trait that captures that contract, a
//! closed-form [`QuadraticObjective`] used throughout the tests, and a
//! [`CountingObjective`] wrapper that records how many evaluations an
//! algorithm performed.
//!
//! Implementations must be pure: evaluating twice at the same point yields
//! the same numbers.

use crate::{
    error::{OptimizerError, Result},
    types::{DMatrix, DVector, Scalar},
};
use std::cell::Cell;
use std::fmt::Debug;

/// Trait for smooth objective functions f: ℝⁿ → ℝ.
pub trait Objective<T>: Debug
where
    T: Scalar,
{
    /// Number of variables n.
    fn dimension(&self) -> usize;

    /// Evaluates f(x).
    fn value(&self, point: &DVector<T>) -> Result<T>;

    /// Evaluates the gradient ∇f(x).
    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>>;

    /// Evaluates the Hessian ∇²f(x).
    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>>;

    /// Evaluates f(x) and ∇f(x) together.
    ///
    /// # Default Implementation
    ///
    /// Calls `value` and `gradient` in turn.
    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        Ok((self.value(point)?, self.gradient(point)?))
    }

    /// Checks that a point has the dimension this objective expects.
    fn check_point(&self, point: &DVector<T>) -> Result<()> {
        if point.len() == self.dimension() {
            Ok(())
        } else {
            Err(OptimizerError::dimension_mismatch(
                self.dimension(),
                point.len(),
            ))
        }
    }
}

impl<T, O> Objective<T> for &O
where
    T: Scalar,
    O: Objective<T> + ?Sized,
{
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn value(&self, point: &DVector<T>) -> Result<T> {
        (**self).value(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        (**self).gradient(point)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        (**self).hessian(point)
    }

    fn value_and_gradient(&self, point: &DVector<T>) -> Result<(T, DVector<T>)> {
        (**self).value_and_gradient(point)
    }
}

/// Quadratic objective f(x) = ½ xᵀAx + bᵀx + c.
///
/// With A symmetric positive definite the unique minimizer is x* = −A⁻¹b,
/// which makes this the reference problem for convergence tests.
#[derive(Debug, Clone)]
pub struct QuadraticObjective<T>
where
    T: Scalar,
{
    /// The quadratic form matrix (should be symmetric)
    pub a: DMatrix<T>,
    /// The linear term
    pub b: DVector<T>,
    /// The constant term
    pub c: T,
}

impl<T> QuadraticObjective<T>
where
    T: Scalar,
{
    /// Creates a new quadratic objective.
    pub fn new(a: DMatrix<T>, b: DVector<T>, c: T) -> Result<Self> {
        let n = b.len();
        if a.nrows() != n || a.ncols() != n {
            return Err(OptimizerError::dimension_mismatch(
                format!("{n}x{n}"),
                format!("{}x{}", a.nrows(), a.ncols()),
            ));
        }
        Ok(Self { a, b, c })
    }

    /// Creates a simple quadratic with identity matrix: f(x) = 0.5 * ||x||^2
    pub fn simple(dim: usize) -> Self {
        Self {
            a: DMatrix::identity(dim, dim),
            b: DVector::zeros(dim),
            c: T::zero(),
        }
    }
}

impl<T> Objective<T> for QuadraticObjective<T>
where
    T: Scalar,
{
    fn dimension(&self) -> usize {
        self.b.len()
    }

    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.check_point(point)?;
        let ax = &self.a * point;
        Ok(point.dot(&ax) * <T as Scalar>::from_f64(0.5) + self.b.dot(point) + self.c)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_point(point)?;
        Ok(&self.a * point + &self.b)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.check_point(point)?;
        Ok(self.a.clone())
    }
}

/// Wrapper to count objective evaluations for testing and debugging.
#[derive(Debug)]
pub struct CountingObjective<O> {
    /// The underlying objective
    pub inner: O,
    value_count: Cell<usize>,
    gradient_count: Cell<usize>,
    hessian_count: Cell<usize>,
}

impl<O> CountingObjective<O> {
    /// Creates a new counting wrapper around an objective.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            value_count: Cell::new(0),
            gradient_count: Cell::new(0),
            hessian_count: Cell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        self.value_count.set(0);
        self.gradient_count.set(0);
        self.hessian_count.set(0);
    }

    /// Returns the current (value, gradient, hessian) evaluation counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.value_count.get(),
            self.gradient_count.get(),
            self.hessian_count.get(),
        )
    }
}

impl<T, O> Objective<T> for CountingObjective<O>
where
    T: Scalar,
    O: Objective<T>,
{
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.value_count.set(self.value_count.get() + 1);
        self.inner.value(point)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.gradient(point)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.hessian_count.set(self.hessian_count.get() + 1);
        self.inner.hessian(point)
    }
}
