//! Error types for descent optimization.
//!
//! This module defines the error type shared by the derivative evaluator,
//! the line search and the optimization drivers.
//!
//! Running out of iterations is not an error: an exhausted budget is
//! reported through
//! [`TerminationReason::MaxIterations`](crate::optimizer::TerminationReason)
//! on a regular result, never as an error.

use thiserror::Error;

/// Errors that can occur during optimization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizerError {
    /// An objective or derivative did not reduce to a finite real number.
    ///
    /// This error occurs when the objective (or one of its derivatives) is
    /// undefined at the evaluation point, for instance a division by zero
    /// or the logarithm of a negative number.
    #[error("Expression did not reduce to a real number: {reason}")]
    NonNumericResult {
        /// Description of the failed evaluation
        reason: String,
    },

    /// The Newton system H·s = −g could not be solved.
    ///
    /// The direction selector recovers from this locally by falling back to
    /// the steepest-descent direction; it is only surfaced when the Newton
    /// solve is called directly.
    #[error("Newton system is singular: {reason}")]
    SingularSystem {
        /// Description of the solver failure
        reason: String,
    },

    /// Invalid optimizer configuration.
    ///
    /// This error occurs when the optimizer is configured with invalid
    /// parameters (e.g. a shrink factor outside (0, 1)) or when the initial
    /// point does not match the objective's variable list.
    #[error("Invalid optimizer configuration: {reason} ({parameter} = {value})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Dimension mismatch between vectors or matrices.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Line search failed to find an acceptable step.
    ///
    /// Backtracking only gives up when the direction is not a descent
    /// direction or when the trial step underflows to zero.
    #[error("Line search failed: {reason}")]
    LineSearchFailed {
        /// Description of why the line search failed
        reason: String,
        /// Number of backtracking steps attempted
        iterations: usize,
        /// Last step size tried
        last_step_size: f64,
        /// Function value at the starting point
        initial_value: f64,
    },

    /// An observer callback reported a failure.
    #[error("Callback failed: {reason}")]
    CallbackError {
        /// Description of the callback failure
        reason: String,
    },
}

impl OptimizerError {
    /// Create a NonNumericResult error with a custom reason.
    pub fn non_numeric<S: Into<String>>(reason: S) -> Self {
        Self::NonNumericResult {
            reason: reason.into(),
        }
    }

    /// Create a SingularSystem error with a custom reason.
    pub fn singular_system<S: Into<String>>(reason: S) -> Self {
        Self::SingularSystem {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a LineSearchFailed error with detailed context.
    pub fn line_search_failed<S: Into<String>>(
        reason: S,
        iterations: usize,
        last_step_size: f64,
        initial_value: f64,
    ) -> Self {
        Self::LineSearchFailed {
            reason: reason.into(),
            iterations,
            last_step_size,
            initial_value,
        }
    }

    /// Create a CallbackError with a custom reason.
    pub fn callback<S: Into<String>>(reason: S) -> Self {
        Self::CallbackError {
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the caller's configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::DimensionMismatch { .. }
        )
    }
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;
