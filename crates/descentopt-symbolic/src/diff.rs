//! Symbolic differentiation.
//!
//! [`Expr::diff`] applies the usual rules node by node and rebuilds the
//! result with the simplifying constructors, so derivatives of polynomials
//! come out as compact polynomials rather than trees full of `0 * x` terms.

use crate::expr::{Expr, Func, Symbol};
use descentopt_core::types::Scalar;

impl<T> Expr<T>
where
    T: Scalar,
{
    /// Partial derivative ∂self/∂symbol.
    ///
    /// # Rules
    ///
    /// - Sum and difference: (a ± b)' = a' ± b'
    /// - Product: (ab)' = a'b + ab'
    /// - Quotient: (a/b)' = (a'b − ab') / b²
    /// - Power with exponent free of `symbol`: (aᶜ)' = c·aᶜ⁻¹·a'
    /// - General power: (aᵇ)' = aᵇ·(b'·ln a + b·a'/a)
    /// - Chain rule for exp, ln, sqrt, sin, cos and tan
    pub fn diff(&self, symbol: &Symbol) -> Self {
        if !self.depends_on(symbol) {
            return Self::zero();
        }

        match self {
            Self::Const(_) => Self::zero(),
            Self::Var(s) => {
                if s == symbol {
                    Self::one()
                } else {
                    Self::zero()
                }
            }
            Self::Neg(a) => Self::negate(a.diff(symbol)),
            Self::Add(a, b) => Self::sum(a.diff(symbol), b.diff(symbol)),
            Self::Sub(a, b) => Self::difference(a.diff(symbol), b.diff(symbol)),
            Self::Mul(a, b) => Self::sum(
                Self::product(a.diff(symbol), (**b).clone()),
                Self::product((**a).clone(), b.diff(symbol)),
            ),
            Self::Div(a, b) => {
                if !b.depends_on(symbol) {
                    return Self::quotient(a.diff(symbol), (**b).clone());
                }
                let numerator = Self::difference(
                    Self::product(a.diff(symbol), (**b).clone()),
                    Self::product((**a).clone(), b.diff(symbol)),
                );
                Self::quotient(numerator, (**b).clone().powi(2))
            }
            Self::Pow(base, exponent) => {
                if exponent.depends_on(symbol) {
                    let log_term = Self::sum(
                        Self::product(exponent.diff(symbol), (**base).clone().ln()),
                        Self::quotient(
                            Self::product((**exponent).clone(), base.diff(symbol)),
                            (**base).clone(),
                        ),
                    );
                    Self::product(self.clone(), log_term)
                } else {
                    let reduced = Self::difference((**exponent).clone(), Self::one());
                    Self::product(
                        Self::product((**exponent).clone(), Self::power((**base).clone(), reduced)),
                        base.diff(symbol),
                    )
                }
            }
            Self::Func(func, a) => {
                let inner = a.diff(symbol);
                let a = (**a).clone();
                let outer = match func {
                    Func::Exp => a.exp(),
                    Func::Ln => Self::quotient(Self::one(), a),
                    Func::Sqrt => Self::quotient(
                        Self::one(),
                        Self::product(Self::constant(<T as Scalar>::from_f64(2.0)), a.sqrt()),
                    ),
                    Func::Sin => a.cos(),
                    Func::Cos => Self::negate(a.sin()),
                    Func::Tan => Self::quotient(Self::one(), a.cos().powi(2)),
                };
                Self::product(outer, inner)
            }
        }
    }

    /// Gradient expressions ∂self/∂vᵢ, one per variable, in order.
    pub fn gradient(&self, variables: &[Symbol]) -> Vec<Self> {
        variables.iter().map(|v| self.diff(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::symbols;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn vars() -> (Symbol, Symbol, Expr<f64>, Expr<f64>) {
        let s = symbols("x y");
        let x = Expr::var(&s[0]);
        let y = Expr::var(&s[1]);
        (s[0].clone(), s[1].clone(), x, y)
    }

    #[test]
    fn test_polynomial_derivative_is_simplified() {
        let (sx, _, x, _) = vars();
        let f = x.clone().powi(3) * 2.0 + x * 5.0 + 7.0;
        assert_eq!(f.diff(&sx).to_string(), "6 * x^2 + 5");
    }

    #[test]
    fn test_unrelated_variable_gives_zero() {
        let (_, sy, x, _) = vars();
        assert_eq!((x.clone() * x.sin()).diff(&sy), Expr::zero());
    }

    #[test]
    fn test_product_and_quotient_rules() {
        let (sx, sy, x, y) = vars();
        let point = [2.0, 3.0];
        let names = [sx.clone(), sy.clone()];

        // d/dx (x² y) = 2xy
        let f = x.clone().powi(2) * y.clone();
        assert_relative_eq!(f.diff(&sx).eval(&names, &point).unwrap(), 12.0);

        // d/dy (x / y) = -x / y²
        let g = x / y;
        assert_relative_eq!(g.diff(&sy).eval(&names, &point).unwrap(), -2.0 / 9.0);
    }

    #[test]
    fn test_chain_rule() {
        let (sx, _, x, _) = vars();
        let names = [sx.clone()];
        let at = |e: &Expr<f64>, v: f64| e.diff(&sx).eval(&names, &[v]).unwrap();

        assert_relative_eq!(at(&x.clone().powi(2).exp(), 1.0), 2.0 * 1.0_f64.exp());
        assert_relative_eq!(at(&x.clone().ln(), 4.0), 0.25);
        assert_relative_eq!(at(&x.clone().sqrt(), 4.0), 0.25);
        assert_relative_eq!(at(&x.clone().sin(), 0.5), 0.5_f64.cos());
        assert_relative_eq!(at(&x.clone().cos(), 0.5), -(0.5_f64.sin()));
        assert_relative_eq!(at(&x.clone().tan(), 0.5), 1.0 / 0.5_f64.cos().powi(2));
    }

    #[test]
    fn test_variable_exponent() {
        let (sx, _, x, _) = vars();
        // d/dx x^x = x^x (ln x + 1)
        let f = x.clone().pow(x);
        let value = f.diff(&sx).eval(&[sx.clone()], &[2.0]).unwrap();
        assert_relative_eq!(value, 4.0 * (2.0_f64.ln() + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_gradient_order_follows_variables() {
        let (sx, sy, x, y) = vars();
        let f = x * 3.0 + y * 4.0;
        let grad = f.gradient(&[sy, sx]);
        assert_eq!(grad, vec![Expr::Const(4.0), Expr::Const(3.0)]);
    }
}
