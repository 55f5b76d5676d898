//! Expression trees over named variables.
//!
//! An [`Expr`] is an immutable tree of constants, variables, arithmetic
//! operators and elementary functions. Expressions are assembled either with
//! the usual operators or by [`Expr::parse`](crate::parse):
//!
//! ```rust
//! use descentopt_symbolic::{symbols, Expr};
//!
//! let vars = symbols("x y");
//! let (x, y) = (Expr::<f64>::var(&vars[0]), Expr::<f64>::var(&vars[1]));
//! let f = x.clone().powi(2) * 3.0 + x * y.clone() - y.sin();
//!
//! assert_eq!(f.to_string(), "3 * x^2 + x * y - sin(y)");
//! ```
//!
//! # Simplification
//!
//! Every node is built through a simplifying constructor ([`Expr::sum`],
//! [`Expr::product`], ...). These fold constant sub-trees, drop additive and
//! multiplicative identities and collapse double negations. Folding only
//! happens when the folded value is finite, so `1 / 0` stays a quotient and
//! is reported when evaluated.

use descentopt_core::types::Scalar;
use num_traits::Float;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A named variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Creates symbols from a whitespace- or comma-separated list of names.
///
/// ```rust
/// # use descentopt_symbolic::{symbols, Symbol};
/// assert_eq!(symbols("x1, x2"), vec![Symbol::new("x1"), Symbol::new("x2")]);
/// ```
pub fn symbols(names: &str) -> Vec<Symbol> {
    names
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
        .map(Symbol::new)
        .collect()
}

/// Elementary functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    /// eˣ
    Exp,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
}

impl Func {
    /// Name used when rendering and parsing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Looks a function up by name. `log` is accepted as the natural log.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exp" => Some(Self::Exp),
            "ln" | "log" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            _ => None,
        }
    }

    /// Applies the function to a number. May return NaN or ±∞.
    pub fn apply<T: Scalar>(self, x: T) -> T {
        match self {
            Self::Exp => <T as Float>::exp(x),
            Self::Ln => <T as Float>::ln(x),
            Self::Sqrt => <T as Float>::sqrt(x),
            Self::Sin => <T as Float>::sin(x),
            Self::Cos => <T as Float>::cos(x),
            Self::Tan => <T as Float>::tan(x),
        }
    }
}

/// Raises `base` to `exponent`, using integer powers when the exponent is
/// integral so that negative bases stay real.
pub(crate) fn pow_value<T: Scalar>(base: T, exponent: T) -> T {
    if <T as Float>::fract(exponent) == T::zero() {
        if let Some(n) = num_traits::cast::<T, i32>(exponent) {
            return <T as Float>::powi(base, n);
        }
    }
    <T as Float>::powf(base, exponent)
}

/// Deepest expression tree the parser and [`SymbolicObjective`] accept.
///
/// Differentiation, evaluation and rendering recurse once per level, and
/// derivatives can be about twice as deep as their source.
///
/// [`SymbolicObjective`]: crate::objective::SymbolicObjective
pub const MAX_DEPTH: usize = 512;

/// Symbolic expression over scalars of type `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<T>
where
    T: Scalar,
{
    /// Numeric constant
    Const(T),
    /// Variable
    Var(Symbol),
    /// −a
    Neg(Box<Expr<T>>),
    /// a + b
    Add(Box<Expr<T>>, Box<Expr<T>>),
    /// a − b
    Sub(Box<Expr<T>>, Box<Expr<T>>),
    /// a · b
    Mul(Box<Expr<T>>, Box<Expr<T>>),
    /// a / b
    Div(Box<Expr<T>>, Box<Expr<T>>),
    /// a ^ b
    Pow(Box<Expr<T>>, Box<Expr<T>>),
    /// f(a)
    Func(Func, Box<Expr<T>>),
}

impl<T> Expr<T>
where
    T: Scalar,
{
    /// A constant expression.
    pub fn constant(value: T) -> Self {
        Self::Const(value)
    }

    /// A variable expression.
    pub fn var(symbol: &Symbol) -> Self {
        Self::Var(symbol.clone())
    }

    /// The constant 0.
    pub fn zero() -> Self {
        Self::Const(T::zero())
    }

    /// The constant 1.
    pub fn one() -> Self {
        Self::Const(T::one())
    }

    /// Returns the value if this is a constant node.
    pub fn as_const(&self) -> Option<T> {
        match self {
            Self::Const(c) => Some(*c),
            _ => None,
        }
    }

    fn is_const_eq(&self, value: T) -> bool {
        self.as_const() == Some(value)
    }

    fn folded(value: T) -> Option<Self> {
        value.is_real().then_some(Self::Const(value))
    }

    /// Simplifying constructor for a + b.
    pub fn sum(lhs: Self, rhs: Self) -> Self {
        if let (Some(a), Some(b)) = (lhs.as_const(), rhs.as_const()) {
            if let Some(folded) = Self::folded(a + b) {
                return folded;
            }
        }
        if lhs.is_const_eq(T::zero()) {
            return rhs;
        }
        if rhs.is_const_eq(T::zero()) {
            return lhs;
        }
        match rhs {
            Self::Neg(inner) => Self::difference(lhs, *inner),
            Self::Const(c) if c < T::zero() => Self::difference(lhs, Self::Const(-c)),
            rhs => Self::Add(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Simplifying constructor for a − b.
    pub fn difference(lhs: Self, rhs: Self) -> Self {
        if let (Some(a), Some(b)) = (lhs.as_const(), rhs.as_const()) {
            if let Some(folded) = Self::folded(a - b) {
                return folded;
            }
        }
        if rhs.is_const_eq(T::zero()) {
            return lhs;
        }
        if lhs.is_const_eq(T::zero()) {
            return Self::negate(rhs);
        }
        match rhs {
            Self::Neg(inner) => Self::sum(lhs, *inner),
            rhs => Self::Sub(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Simplifying constructor for a · b.
    ///
    /// Constant factors are moved to the left and merged.
    pub fn product(lhs: Self, rhs: Self) -> Self {
        if let (Some(a), Some(b)) = (lhs.as_const(), rhs.as_const()) {
            if let Some(folded) = Self::folded(a * b) {
                return folded;
            }
        }
        if lhs.is_const_eq(T::zero()) || rhs.is_const_eq(T::zero()) {
            return Self::zero();
        }
        if lhs.is_const_eq(T::one()) {
            return rhs;
        }
        if rhs.is_const_eq(T::one()) {
            return lhs;
        }
        if lhs.is_const_eq(-T::one()) {
            return Self::negate(rhs);
        }
        if rhs.is_const_eq(-T::one()) {
            return Self::negate(lhs);
        }

        match (lhs, rhs) {
            (lhs, rhs @ Self::Const(_)) if lhs.as_const().is_none() => Self::product(rhs, lhs),
            (Self::Const(c1), Self::Mul(inner_lhs, inner_rhs)) => match *inner_lhs {
                Self::Const(c2) if (c1 * c2).is_real() => {
                    Self::product(Self::Const(c1 * c2), *inner_rhs)
                }
                inner_lhs => Self::Mul(
                    Box::new(Self::Const(c1)),
                    Box::new(Self::Mul(Box::new(inner_lhs), inner_rhs)),
                ),
            },
            (Self::Neg(a), Self::Neg(b)) => Self::product(*a, *b),
            (Self::Neg(a), rhs) => Self::negate(Self::product(*a, rhs)),
            (lhs, Self::Neg(b)) => Self::negate(Self::product(lhs, *b)),
            (lhs, rhs) => Self::Mul(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Simplifying constructor for a / b.
    pub fn quotient(lhs: Self, rhs: Self) -> Self {
        if let (Some(a), Some(b)) = (lhs.as_const(), rhs.as_const()) {
            if b != T::zero() {
                if let Some(folded) = Self::folded(a / b) {
                    return folded;
                }
            }
        }
        if rhs.is_const_eq(T::one()) {
            return lhs;
        }
        if lhs.is_const_eq(T::zero()) && !rhs.is_const_eq(T::zero()) {
            return Self::zero();
        }
        Self::Div(Box::new(lhs), Box::new(rhs))
    }

    /// Simplifying constructor for −a.
    pub fn negate(operand: Self) -> Self {
        match operand {
            Self::Const(c) => Self::Const(-c),
            Self::Neg(inner) => *inner,
            operand => Self::Neg(Box::new(operand)),
        }
    }

    /// Simplifying constructor for aᵇ.
    pub fn power(base: Self, exponent: Self) -> Self {
        if exponent.is_const_eq(T::zero()) {
            return Self::one();
        }
        if exponent.is_const_eq(T::one()) {
            return base;
        }
        if let (Some(b), Some(e)) = (base.as_const(), exponent.as_const()) {
            if let Some(folded) = Self::folded(pow_value(b, e)) {
                return folded;
            }
        }
        match base {
            Self::Pow(inner_base, inner_exp) if exponent.as_const().is_some() => {
                match (inner_exp.as_const(), exponent.as_const()) {
                    (Some(e1), Some(e2))
                        if <T as Float>::fract(e1) == T::zero()
                            && <T as Float>::fract(e2) == T::zero() =>
                    {
                        Self::power(*inner_base, Self::Const(e1 * e2))
                    }
                    _ => Self::Pow(Box::new(Self::Pow(inner_base, inner_exp)), Box::new(exponent)),
                }
            }
            base => Self::Pow(Box::new(base), Box::new(exponent)),
        }
    }

    /// Simplifying constructor for f(a).
    pub fn apply(func: Func, operand: Self) -> Self {
        if let Some(c) = operand.as_const() {
            if let Some(folded) = Self::folded(func.apply(c)) {
                return folded;
            }
        }
        Self::Func(func, Box::new(operand))
    }

    /// self^n for an integer n.
    pub fn powi(self, n: i32) -> Self {
        Self::power(self, Self::Const(<T as Scalar>::from_f64(f64::from(n))))
    }

    /// self^exponent.
    pub fn pow(self, exponent: Self) -> Self {
        Self::power(self, exponent)
    }

    /// eˢᵉˡᶠ
    pub fn exp(self) -> Self {
        Self::apply(Func::Exp, self)
    }

    /// ln(self)
    pub fn ln(self) -> Self {
        Self::apply(Func::Ln, self)
    }

    /// √self
    pub fn sqrt(self) -> Self {
        Self::apply(Func::Sqrt, self)
    }

    /// sin(self)
    pub fn sin(self) -> Self {
        Self::apply(Func::Sin, self)
    }

    /// cos(self)
    pub fn cos(self) -> Self {
        Self::apply(Func::Cos, self)
    }

    /// tan(self)
    pub fn tan(self) -> Self {
        Self::apply(Func::Tan, self)
    }

    /// The set of variables appearing in the expression.
    pub fn free_symbols(&self) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Symbol>) {
        match self {
            Self::Const(_) => {}
            Self::Var(s) => {
                out.insert(s.clone());
            }
            Self::Neg(a) | Self::Func(_, a) => a.collect_symbols(out),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
        }
    }

    /// Returns true if `symbol` occurs in the expression.
    pub fn depends_on(&self, symbol: &Symbol) -> bool {
        match self {
            Self::Const(_) => false,
            Self::Var(s) => s == symbol,
            Self::Neg(a) | Self::Func(_, a) => a.depends_on(symbol),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => a.depends_on(symbol) || b.depends_on(symbol),
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Const(_) | Self::Var(_) => 1,
            Self::Neg(a) | Self::Func(_, a) => 1 + a.node_count(),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => 1 + a.node_count() + b.node_count(),
        }
    }

    /// Height of the tree, counting a leaf as 1.
    ///
    /// Computed without recursion, so it is safe on trees too deep for
    /// [`Expr::diff`], [`Expr::eval`] or `Display`.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            match node {
                Self::Const(_) | Self::Var(_) => {}
                Self::Neg(a) | Self::Func(_, a) => stack.push((a.as_ref(), depth + 1)),
                Self::Add(a, b)
                | Self::Sub(a, b)
                | Self::Mul(a, b)
                | Self::Div(a, b)
                | Self::Pow(a, b) => {
                    stack.push((a.as_ref(), depth + 1));
                    stack.push((b.as_ref(), depth + 1));
                }
            }
        }
        deepest
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Neg(_) => 3,
            Self::Const(c) if *c < T::zero() => 3,
            Self::Pow(..) => 4,
            Self::Const(_) | Self::Var(_) | Self::Func(..) => 5,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl<T> fmt::Display for Expr<T>
where
    T: Scalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "{c}"),
            Self::Var(s) => write!(f, "{s}"),
            Self::Neg(a) => {
                f.write_str("-")?;
                a.fmt_operand(f, 3)
            }
            Self::Add(a, b) => {
                a.fmt_operand(f, 1)?;
                f.write_str(" + ")?;
                b.fmt_operand(f, 1)
            }
            Self::Sub(a, b) => {
                a.fmt_operand(f, 1)?;
                f.write_str(" - ")?;
                b.fmt_operand(f, 2)
            }
            Self::Mul(a, b) => {
                a.fmt_operand(f, 2)?;
                f.write_str(" * ")?;
                b.fmt_operand(f, 2)
            }
            Self::Div(a, b) => {
                a.fmt_operand(f, 2)?;
                f.write_str(" / ")?;
                b.fmt_operand(f, 3)
            }
            Self::Pow(a, b) => {
                a.fmt_operand(f, 5)?;
                f.write_str("^")?;
                b.fmt_operand(f, 4)
            }
            Self::Func(func, a) => write!(f, "{}({a})", func.name()),
        }
    }
}

impl<T: Scalar> From<Symbol> for Expr<T> {
    fn from(symbol: Symbol) -> Self {
        Self::Var(symbol)
    }
}

impl<T: Scalar> From<&Symbol> for Expr<T> {
    fn from(symbol: &Symbol) -> Self {
        Self::var(symbol)
    }
}

impl<T: Scalar> Neg for Expr<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::negate(self)
    }
}

impl<T: Scalar> Neg for &Expr<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        Expr::negate(self.clone())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $ctor:ident) => {
        impl<T: Scalar> $trait for Expr<T> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::$ctor(self, rhs)
            }
        }

        impl<T: Scalar> $trait<&Expr<T>> for Expr<T> {
            type Output = Self;

            fn $method(self, rhs: &Expr<T>) -> Self {
                Self::$ctor(self, rhs.clone())
            }
        }

        impl<T: Scalar> $trait for &Expr<T> {
            type Output = Expr<T>;

            fn $method(self, rhs: Self) -> Expr<T> {
                Expr::$ctor(self.clone(), rhs.clone())
            }
        }

        impl<T: Scalar> $trait<T> for Expr<T> {
            type Output = Self;

            fn $method(self, rhs: T) -> Self {
                Self::$ctor(self, Self::Const(rhs))
            }
        }

        impl $trait<Expr<f64>> for f64 {
            type Output = Expr<f64>;

            fn $method(self, rhs: Expr<f64>) -> Expr<f64> {
                Expr::$ctor(Expr::Const(self), rhs)
            }
        }

        impl $trait<Expr<f32>> for f32 {
            type Output = Expr<f32>;

            fn $method(self, rhs: Expr<f32>) -> Expr<f32> {
                Expr::$ctor(Expr::Const(self), rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, sum);
impl_binary_op!(Sub, sub, difference);
impl_binary_op!(Mul, mul, product);
impl_binary_op!(Div, div, quotient);
