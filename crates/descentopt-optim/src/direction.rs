//! Search-direction selection for the globalized Newton method.
//!
//! At every iterate the Newton step s solves H s = −g. It is only trusted
//! when its predicted decrease is large relative to its length:
//!
//! ```text
//! com = γ₁ · min(1, ‖s‖^γ₂) · ‖s‖²
//! use s   if  −⟨g, s⟩ ≥ com
//! use −g  otherwise
//! ```
//!
//! This keeps the global convergence of steepest descent while allowing the
//! fast local convergence of Newton's method near a nondegenerate minimizer.
//! A singular (or numerically unusable) Hessian never aborts a run; the
//! selector falls back to −g.

use descentopt_core::{
    error::{OptimizerError, Result},
    optimizer::DirectionKind,
    types::{all_finite, DMatrix, DVector, Scalar},
};
use num_traits::Float;

/// Safeguard parameters (γ₁, γ₂) of the curvature test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonSafeguard<T>
where
    T: Scalar,
{
    /// Scale γ₁ > 0 of the acceptance threshold
    pub gamma1: T,
    /// Exponent γ₂ > 0 applied to ‖s‖ for short steps
    pub gamma2: T,
}

impl<T> NewtonSafeguard<T>
where
    T: Scalar,
{
    /// Creates validated safeguard parameters.
    pub fn new(gamma1: T, gamma2: T) -> Result<Self> {
        let safeguard = Self { gamma1, gamma2 };
        safeguard.validate()?;
        Ok(safeguard)
    }

    /// Checks that both parameters are positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("gamma1", self.gamma1), ("gamma2", self.gamma2)] {
            if !(value > T::zero() && value.is_real()) {
                return Err(OptimizerError::invalid_configuration(
                    "safeguard parameter must be positive and finite",
                    name,
                    value.to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Acceptance threshold γ₁ · min(1, ‖s‖^γ₂) · ‖s‖² for a step of length
    /// `step_norm`.
    pub fn threshold(&self, step_norm: T) -> T {
        let shrink = <T as Float>::min(T::one(), <T as Float>::powf(step_norm, self.gamma2));
        self.gamma1 * shrink * step_norm * step_norm
    }
}

/// A search direction and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDirection<T>
where
    T: Scalar,
{
    /// The direction d_k
    pub direction: DVector<T>,
    /// Newton step, steepest descent, or fallback after a failed solve
    pub kind: DirectionKind,
}

impl<T> SearchDirection<T>
where
    T: Scalar,
{
    /// The steepest-descent direction −g.
    pub fn steepest_descent(gradient: &DVector<T>) -> Self {
        Self {
            direction: -gradient,
            kind: DirectionKind::SteepestDescent,
        }
    }

    /// Returns true if this is a Newton step.
    pub fn is_newton(&self) -> bool {
        self.kind == DirectionKind::Newton
    }
}

/// Solves H s = −g with a dense LU factorization.
///
/// # Errors
///
/// - `DimensionMismatch` if H is not n×n for a gradient of length n
/// - `SingularSystem` if H is singular or the solution is not finite
pub fn solve_newton_system<T>(hessian: &DMatrix<T>, gradient: &DVector<T>) -> Result<DVector<T>>
where
    T: Scalar,
{
    let n = gradient.len();
    if hessian.nrows() != n || hessian.ncols() != n {
        return Err(OptimizerError::dimension_mismatch(
            format!("{n}x{n}"),
            format!("{}x{}", hessian.nrows(), hessian.ncols()),
        ));
    }

    let rhs = -gradient;
    let step = hessian
        .clone()
        .lu()
        .solve(&rhs)
        .ok_or_else(|| OptimizerError::singular_system("LU factorization has a zero pivot"))?;

    if !all_finite(&step) {
        return Err(OptimizerError::singular_system(
            "Newton step has non-finite components",
        ));
    }
    Ok(step)
}

/// Chooses between the Newton step and −g.
///
/// # Errors
///
/// Only `DimensionMismatch` is returned. A singular Hessian yields
/// [`DirectionKind::SingularFallback`] instead of an error.
pub fn select_direction<T>(
    gradient: &DVector<T>,
    hessian: &DMatrix<T>,
    safeguard: &NewtonSafeguard<T>,
) -> Result<SearchDirection<T>>
where
    T: Scalar,
{
    let step = match solve_newton_system(hessian, gradient) {
        Ok(step) => step,
        Err(OptimizerError::SingularSystem { reason }) => {
            log::warn!("falling back to steepest descent: {reason}");
            return Ok(SearchDirection {
                direction: -gradient,
                kind: DirectionKind::SingularFallback,
            });
        }
        Err(err) => return Err(err),
    };

    let predicted_decrease = -gradient.dot(&step);
    let com = safeguard.threshold(step.norm());

    if predicted_decrease >= com {
        Ok(SearchDirection {
            direction: step,
            kind: DirectionKind::Newton,
        })
    } else {
        log::trace!("newton step rejected: -<g, s> = {predicted_decrease} < {com}");
        Ok(SearchDirection::steepest_descent(gradient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn safeguard() -> NewtonSafeguard<f64> {
        NewtonSafeguard::new(1e-6, 0.1).unwrap()
    }

    #[test]
    fn test_safeguard_validation() {
        assert!(NewtonSafeguard::new(1.0, 1.0).is_ok());
        assert!(NewtonSafeguard::new(0.0, 1.0).is_err());
        assert!(NewtonSafeguard::new(1.0, -0.5).is_err());
        assert!(NewtonSafeguard::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_threshold() {
        let s = NewtonSafeguard::new(2.0, 1.0).unwrap();
        // long steps: min(1, ‖s‖^γ₂) = 1
        assert_relative_eq!(s.threshold(3.0), 18.0);
        // short steps: ‖s‖^γ₂ < 1
        assert_relative_eq!(s.threshold(0.5), 2.0 * 0.5 * 0.25);
    }

    #[test]
    fn test_identity_hessian_accepts_newton() {
        let g = DVector::from_vec(vec![1.0, -2.0, 0.5]);
        let h = DMatrix::identity(3, 3);
        let choice = select_direction(&g, &h, &safeguard()).unwrap();

        assert!(choice.is_newton());
        assert_relative_eq!(choice.direction, -&g, epsilon = 1e-14);
    }

    #[test]
    fn test_singular_hessian_falls_back() {
        let g = DVector::from_vec(vec![1.0, 1.0]);
        let h = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let choice = select_direction(&g, &h, &safeguard()).unwrap();

        assert_eq!(choice.kind, DirectionKind::SingularFallback);
        assert_eq!(choice.direction, -&g);

        assert!(matches!(
            solve_newton_system(&h, &g),
            Err(OptimizerError::SingularSystem { .. })
        ));
    }

    #[test]
    fn test_zero_hessian_falls_back() {
        let g = DVector::from_vec(vec![0.5, -0.5]);
        let h = DMatrix::zeros(2, 2);
        let choice = select_direction(&g, &h, &safeguard()).unwrap();
        assert_eq!(choice.kind, DirectionKind::SingularFallback);
    }

    #[test]
    fn test_indefinite_hessian_rejects_newton() {
        // H = diag(1, -1): s = (-1, 1) for g = (1, 1), so -<g, s> = 0
        let g = DVector::from_vec(vec![1.0, 1.0]);
        let h = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        let choice = select_direction(&g, &h, &safeguard()).unwrap();

        assert_eq!(choice.kind, DirectionKind::SteepestDescent);
        assert_eq!(choice.direction, -&g);
    }

    #[test]
    fn test_dimension_mismatch_is_reported() {
        let g = DVector::from_vec(vec![1.0, 1.0]);
        let h = DMatrix::identity(3, 3);
        assert!(matches!(
            select_direction(&g, &h, &safeguard()),
            Err(OptimizerError::DimensionMismatch { .. })
        ));
    }
}
