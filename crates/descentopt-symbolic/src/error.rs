//! Error types for symbolic expressions.

use descentopt_core::OptimizerError;
use thiserror::Error;

/// Errors raised while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The input text is not a well-formed expression.
    #[error("Parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset of the offending token
        position: usize,
        /// What the parser expected
        message: String,
    },

    /// A variable of the expression has no value bound to it.
    #[error("Unbound symbol '{name}'")]
    UnboundSymbol {
        /// Name of the missing symbol
        name: String,
    },

    /// The number of values does not match the number of symbols.
    #[error("Expected {expected} values, got {actual}")]
    ArityMismatch {
        /// Number of symbols
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Evaluation did not produce a finite real number.
    #[error("{reason}")]
    NonNumeric {
        /// Which sub-expression failed and why
        reason: String,
    },
}

impl ExprError {
    /// Create a Parse error.
    pub fn parse<S: Into<String>>(position: usize, message: S) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an UnboundSymbol error.
    pub fn unbound<S: Into<String>>(name: S) -> Self {
        Self::UnboundSymbol { name: name.into() }
    }

    /// Create a NonNumeric error.
    pub fn non_numeric<S: Into<String>>(reason: S) -> Self {
        Self::NonNumeric {
            reason: reason.into(),
        }
    }
}

impl From<ExprError> for OptimizerError {
    fn from(err: ExprError) -> Self {
        OptimizerError::non_numeric(err.to_string())
    }
}

/// Result type alias for expression operations.
pub type Result<T> = std::result::Result<T, ExprError>;
