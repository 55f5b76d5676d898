//! Symbolic objectives with exact derivatives.
//!
//! [`SymbolicObjective`] bundles an expression with its ordered variable
//! list and differentiates it once at construction:
//!
//! - n gradient expressions ∂f/∂xᵢ
//! - n(n+1)/2 Hessian expressions ∂²f/∂xᵢ∂xⱼ for j ≥ i
//!
//! Afterwards every evaluation is a plain substitution. The lower triangle of
//! the Hessian is mirrored from the upper one, so the matrix is exactly
//! symmetric.
//!
//! The free functions [`gradient`] and [`hessian`] differentiate on every call
//! and are meant for one-off evaluations.

use crate::expr::{Expr, Symbol, MAX_DEPTH};
use descentopt_core::{
    error::{OptimizerError, Result},
    objective::Objective,
    types::{DMatrix, DVector, Scalar},
};
use std::collections::BTreeSet;

/// An objective f: ℝⁿ → ℝ given as an expression in n named variables.
#[derive(Debug, Clone)]
pub struct SymbolicObjective<T>
where
    T: Scalar,
{
    expr: Expr<T>,
    variables: Vec<Symbol>,
    gradient: Vec<Expr<T>>,
    hessian_upper: Vec<Expr<T>>,
}

impl<T> SymbolicObjective<T>
where
    T: Scalar,
{
    /// Differentiates `expr` with respect to `variables`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the variable list is empty, contains
    /// a duplicate, or misses a symbol that occurs in `expr`, and if `expr`
    /// is deeper than [`MAX_DEPTH`].
    pub fn new(expr: Expr<T>, variables: Vec<Symbol>) -> Result<Self> {
        let depth = expr.depth();
        if depth > MAX_DEPTH {
            return Err(OptimizerError::invalid_configuration(
                format!(
                    "objective is nested {depth} levels deep, at most {MAX_DEPTH} are supported"
                ),
                "objective",
                depth.to_string(),
            ));
        }
        validate_variables(&expr, &variables)?;

        let gradient = expr.gradient(&variables);
        let mut hessian_upper = Vec::with_capacity(variables.len() * (variables.len() + 1) / 2);
        for (i, partial) in gradient.iter().enumerate() {
            for symbol in &variables[i..] {
                hessian_upper.push(partial.diff(symbol));
            }
        }

        log::debug!(
            "differentiated objective in {} variables ({} gradient nodes, {} hessian nodes)",
            variables.len(),
            gradient.iter().map(Expr::node_count).sum::<usize>(),
            hessian_upper.iter().map(Expr::node_count).sum::<usize>(),
        );

        Ok(Self {
            expr,
            variables,
            gradient,
            hessian_upper,
        })
    }

    /// Parses `text` and differentiates it with respect to `variables`.
    pub fn parse(text: &str, variables: &[&str]) -> Result<Self> {
        let expr = Expr::parse(text).map_err(|err| {
            OptimizerError::invalid_configuration(err.to_string(), "objective", text)
        })?;
        Self::new(expr, variables.iter().copied().map(Symbol::new).collect())
    }

    /// The objective expression.
    pub fn expr(&self) -> &Expr<T> {
        &self.expr
    }

    /// The ordered variable list.
    pub fn variables(&self) -> &[Symbol] {
        &self.variables
    }

    /// The gradient expressions, one per variable.
    pub fn gradient_exprs(&self) -> &[Expr<T>] {
        &self.gradient
    }

    /// The Hessian entry ∂²f/∂xᵢ∂xⱼ.
    pub fn hessian_expr(&self, i: usize, j: usize) -> Option<&Expr<T>> {
        let n = self.variables.len();
        if i >= n || j >= n {
            return None;
        }
        let (row, col) = if i <= j { (i, j) } else { (j, i) };
        self.hessian_upper.get(upper_index(n, row, col))
    }
}

/// Index of (row, col), row ≤ col, in the row-major upper triangle of an
/// n×n matrix. Rows before `row` hold n, n−1, … entries.
fn upper_index(n: usize, row: usize, col: usize) -> usize {
    row * n - row * row.saturating_sub(1) / 2 + (col - row)
}

fn validate_variables<T: Scalar>(expr: &Expr<T>, variables: &[Symbol]) -> Result<()> {
    if variables.is_empty() {
        return Err(OptimizerError::invalid_configuration(
            "objective needs at least one variable",
            "variables",
            "[]",
        ));
    }

    let mut seen = BTreeSet::new();
    for symbol in variables {
        if !seen.insert(symbol) {
            return Err(OptimizerError::invalid_configuration(
                format!("variable '{symbol}' is listed twice"),
                "variables",
                format_variables(variables),
            ));
        }
    }

    if let Some(missing) = expr.free_symbols().into_iter().find(|s| !seen.contains(s)) {
        return Err(OptimizerError::invalid_configuration(
            format!("symbol '{missing}' occurs in the objective but is not a variable"),
            "variables",
            format_variables(variables),
        ));
    }
    Ok(())
}

fn format_variables(variables: &[Symbol]) -> String {
    let names: Vec<_> = variables.iter().map(Symbol::name).collect();
    format!("[{}]", names.join(", "))
}

impl<T> Objective<T> for SymbolicObjective<T>
where
    T: Scalar,
{
    fn dimension(&self) -> usize {
        self.variables.len()
    }

    fn value(&self, point: &DVector<T>) -> Result<T> {
        self.check_point(point)?;
        Ok(self.expr.eval(&self.variables, point.as_slice())?)
    }

    fn gradient(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.check_point(point)?;
        let values = point.as_slice();
        let mut grad = DVector::zeros(self.variables.len());
        for (i, partial) in self.gradient.iter().enumerate() {
            grad[i] = partial.eval(&self.variables, values)?;
        }
        Ok(grad)
    }

    fn hessian(&self, point: &DVector<T>) -> Result<DMatrix<T>> {
        self.check_point(point)?;
        let n = self.variables.len();
        let values = point.as_slice();
        let mut hess = DMatrix::zeros(n, n);
        let mut entries = self.hessian_upper.iter();
        for i in 0..n {
            for j in i..n {
                let entry = entries.next().ok_or_else(|| {
                    OptimizerError::dimension_mismatch(n * (n + 1) / 2, self.hessian_upper.len())
                })?;
                let value = entry.eval(&self.variables, values)?;
                hess[(i, j)] = value;
                hess[(j, i)] = value;
            }
        }
        Ok(hess)
    }
}

/// Gradient of `f` at `point`, differentiating on every call.
///
/// Coordinates of `point` are matched to `variables` by position.
///
/// # Errors
///
/// Returns `NonNumericResult` if any partial derivative is undefined at the
/// point or mentions a symbol missing from `variables`, and
/// `InvalidConfiguration` if the point has the wrong length.
pub fn gradient<T: Scalar>(
    f: &Expr<T>,
    variables: &[Symbol],
    point: &DVector<T>,
) -> Result<DVector<T>> {
    check_length(variables, point)?;
    let values = point.as_slice();
    let partials = variables
        .iter()
        .map(|v| f.diff(v).eval(variables, values))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(DVector::from_vec(partials))
}

/// Hessian of `f` at `point`, differentiating on every call.
///
/// Only the upper triangle is differentiated; the lower one is mirrored.
pub fn hessian<T: Scalar>(
    f: &Expr<T>,
    variables: &[Symbol],
    point: &DVector<T>,
) -> Result<DMatrix<T>> {
    check_length(variables, point)?;
    let n = variables.len();
    let values = point.as_slice();
    let mut hess = DMatrix::zeros(n, n);
    for (i, vi) in variables.iter().enumerate() {
        let partial = f.diff(vi);
        for (j, vj) in variables.iter().enumerate().skip(i) {
            let value = partial.diff(vj).eval(variables, values)?;
            hess[(i, j)] = value;
            hess[(j, i)] = value;
        }
    }
    Ok(hess)
}

fn check_length<T: Scalar>(variables: &[Symbol], point: &DVector<T>) -> Result<()> {
    if variables.len() == point.len() {
        Ok(())
    } else {
        Err(OptimizerError::invalid_configuration(
            format!(
                "point has {} coordinates but there are {} variables",
                point.len(),
                variables.len()
            ),
            "point",
            format!("{point:?}"),
        ))
    }
}
