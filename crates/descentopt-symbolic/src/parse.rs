//! Recursive-descent parser for infix expressions.
//!
//! # Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | 'pi' | ident | ident '(' expr ')' | '(' expr ')'
//! ```
//!
//! Exponentiation binds tighter than unary minus and is right-associative,
//! so `-x^2` is `-(x^2)` and `2^3^2` is `2^(3^2)`. Known function names are
//! listed on [`Func`]; any other identifier is a variable.
//!
//! Input nested deeper than [`MAX_DEPTH`] is rejected, counting both
//! parenthesised groups and chains of operators.

use crate::{
    error::{ExprError, Result},
    expr::{Expr, Func, Symbol, MAX_DEPTH},
};
use descentopt_core::types::Scalar;
use std::str::FromStr;

const TOO_DEEP: &str = "expression nested too deeply";

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    End,
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let token = match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                Token::Caret
            }
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'^' => Token::Caret,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        while j < bytes.len() && bytes[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text = &input[start..i];
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ExprError::parse(start, format!("invalid number '{text}'")))?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((Token::Ident(input[start..i].to_string()), start));
                continue;
            }
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(ExprError::parse(start, format!("unexpected character '{ch}'")));
            }
        };
        tokens.push((token, start));
        i += 1;
    }

    tokens.push((Token::End, input.len()));
    Ok(tokens)
}

/// Parsed subexpression with an upper bound on its tree depth.
type Parsed<T> = (Expr<T>, usize);

struct Parser {
    tokens: Vec<(Token, usize)>,
    cursor: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.cursor].0
    }

    fn position(&self) -> usize {
        self.tokens[self.cursor].1
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.cursor].0.clone();
        if token != Token::End {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<()> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(ExprError::parse(self.position(), format!("expected {what}")))
        }
    }

    /// Depth of a node whose deepest child has depth `child`.
    fn parent_depth(child: usize, position: usize) -> Result<usize> {
        if child >= MAX_DEPTH {
            return Err(ExprError::parse(position, TOO_DEEP));
        }
        Ok(child + 1)
    }

    fn expr<T: Scalar>(&mut self) -> Result<Parsed<T>> {
        let (mut lhs, mut depth) = self.term()?;
        loop {
            let position = self.position();
            let subtract = match self.peek() {
                Token::Plus => false,
                Token::Minus => true,
                _ => return Ok((lhs, depth)),
            };
            self.advance();
            let (rhs, rhs_depth) = self.term()?;
            depth = Self::parent_depth(depth.max(rhs_depth), position)?;
            lhs = if subtract {
                Expr::difference(lhs, rhs)
            } else {
                Expr::sum(lhs, rhs)
            };
        }
    }

    fn term<T: Scalar>(&mut self) -> Result<Parsed<T>> {
        let (mut lhs, mut depth) = self.unary()?;
        loop {
            let position = self.position();
            let divide = match self.peek() {
                Token::Star => false,
                Token::Slash => true,
                _ => return Ok((lhs, depth)),
            };
            self.advance();
            let (rhs, rhs_depth) = self.unary()?;
            depth = Self::parent_depth(depth.max(rhs_depth), position)?;
            lhs = if divide {
                Expr::quotient(lhs, rhs)
            } else {
                Expr::product(lhs, rhs)
            };
        }
    }

    // Every recursive path (parentheses, calls, signs, exponents) passes
    // through here, so `nesting` bounds the parser's own stack.
    fn unary<T: Scalar>(&mut self) -> Result<Parsed<T>> {
        let position = self.position();
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(ExprError::parse(position, TOO_DEEP));
        }
        let parsed = match self.peek() {
            Token::Minus => {
                self.advance();
                self.unary().and_then(|(operand, depth)| {
                    Ok((Expr::negate(operand), Self::parent_depth(depth, position)?))
                })
            }
            Token::Plus => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        };
        self.nesting -= 1;
        parsed
    }

    fn power<T: Scalar>(&mut self) -> Result<Parsed<T>> {
        let (base, base_depth) = self.primary()?;
        if *self.peek() == Token::Caret {
            let position = self.position();
            self.advance();
            let (exponent, exponent_depth) = self.unary()?;
            let depth = Self::parent_depth(base_depth.max(exponent_depth), position)?;
            return Ok((Expr::power(base, exponent), depth));
        }
        Ok((base, base_depth))
    }

    fn primary<T: Scalar>(&mut self) -> Result<Parsed<T>> {
        let position = self.position();
        match self.advance() {
            Token::Number(value) => <T as Scalar>::try_from_f64(value)
                .map(|c| (Expr::Const(c), 1))
                .ok_or_else(|| ExprError::parse(position, format!("number {value} out of range"))),
            Token::Ident(name) => {
                if *self.peek() == Token::LParen {
                    let func = Func::from_name(&name).ok_or_else(|| {
                        ExprError::parse(position, format!("unknown function '{name}'"))
                    })?;
                    self.advance();
                    let (arg, depth) = self.expr()?;
                    self.expect(&Token::RParen, "')'")?;
                    Ok((Expr::apply(func, arg), Self::parent_depth(depth, position)?))
                } else if name == "pi" {
                    Ok((Expr::Const(<T as nalgebra::RealField>::pi()), 1))
                } else {
                    Ok((Expr::Var(Symbol::new(name)), 1))
                }
            }
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::End => Err(ExprError::parse(position, "unexpected end of input")),
            token => Err(ExprError::parse(
                position,
                format!("unexpected token {token:?}"),
            )),
        }
    }
}

impl<T> Expr<T>
where
    T: Scalar,
{
    /// Parses an infix expression such as `2*x1^4 + x1*x2 - ln(x2)`.
    ///
    /// # Errors
    ///
    /// Returns `ExprError::Parse` with the byte offset of the first token
    /// that does not fit the grammar, or of the token at which the tree
    /// would grow deeper than [`MAX_DEPTH`].
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser {
            tokens: tokenize(input)?,
            cursor: 0,
            nesting: 0,
        };
        let (expr, _) = parser.expr()?;
        if *parser.peek() != Token::End {
            return Err(ExprError::parse(
                parser.position(),
                "unexpected trailing input",
            ));
        }
        Ok(expr)
    }
}

impl<T> FromStr for Expr<T>
where
    T: Scalar,
{
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
