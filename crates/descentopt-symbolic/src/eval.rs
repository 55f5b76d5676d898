//! Numeric evaluation by substitution.

use crate::{
    error::{ExprError, Result},
    expr::{pow_value, Expr, Func, Symbol},
};
use descentopt_core::types::Scalar;

impl<T> Expr<T>
where
    T: Scalar,
{
    /// Substitutes `values[i]` for `symbols[i]` and reduces to a number.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` if the two slices differ in length
    /// - `UnboundSymbol` if the expression mentions a symbol not in `symbols`
    /// - `NonNumeric` on division by zero, or when any sub-expression
    ///   evaluates to NaN or ±∞ (ln of a non-positive number, overflow, ...)
    pub fn eval(&self, symbols: &[Symbol], values: &[T]) -> Result<T> {
        if symbols.len() != values.len() {
            return Err(ExprError::ArityMismatch {
                expected: symbols.len(),
                actual: values.len(),
            });
        }
        self.eval_node(symbols, values)
    }

    fn eval_node(&self, symbols: &[Symbol], values: &[T]) -> Result<T> {
        let value = match self {
            Self::Const(c) => *c,
            Self::Var(s) => {
                return symbols
                    .iter()
                    .position(|candidate| candidate == s)
                    .map(|i| values[i])
                    .ok_or_else(|| ExprError::unbound(s.name()))
                    .and_then(|v| finite(v, self));
            }
            Self::Neg(a) => -a.eval_node(symbols, values)?,
            Self::Add(a, b) => a.eval_node(symbols, values)? + b.eval_node(symbols, values)?,
            Self::Sub(a, b) => a.eval_node(symbols, values)? - b.eval_node(symbols, values)?,
            Self::Mul(a, b) => a.eval_node(symbols, values)? * b.eval_node(symbols, values)?,
            Self::Div(a, b) => {
                let numerator = a.eval_node(symbols, values)?;
                let denominator = b.eval_node(symbols, values)?;
                if denominator == T::zero() {
                    return Err(ExprError::non_numeric(format!(
                        "division by zero in {self}"
                    )));
                }
                numerator / denominator
            }
            Self::Pow(a, b) => {
                let base = a.eval_node(symbols, values)?;
                let exponent = b.eval_node(symbols, values)?;
                if base == T::zero() && exponent < T::zero() {
                    return Err(ExprError::non_numeric(format!(
                        "division by zero in {self}"
                    )));
                }
                pow_value(base, exponent)
            }
            Self::Func(func, a) => {
                let arg = a.eval_node(symbols, values)?;
                if matches!(func, Func::Ln) && arg <= T::zero() {
                    return Err(ExprError::non_numeric(format!(
                        "logarithm of non-positive value {arg} in {self}"
                    )));
                }
                func.apply(arg)
            }
        };
        finite(value, self)
    }
}

fn finite<T: Scalar>(value: T, expr: &Expr<T>) -> Result<T> {
    if value.is_real() {
        Ok(value)
    } else {
        Err(ExprError::non_numeric(format!(
            "{expr} evaluated to {value}"
        )))
    }
}
