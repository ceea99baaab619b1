//! A representation of algebraic expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](eqn_parser::parser::ast::Expr) type from `eqn_parser` keeps the exact shape of
//! the input, which is what the user sees. It's convenient for display, but not so much for
//! algebraic manipulation.
//!
//! [`SymExpr`] recursively flattens the AST into lists of terms and factors, normalizing the
//! expression into a sum of products. Subtraction becomes addition of a term multiplied by `-1`,
//! and division becomes multiplication by a factor raised to the power of `-1`.
//!
//! # Strict equality
//!
//! Two expressions are **strictly equal** if they are the same kind of node with strictly equal
//! children, where the terms of an [`SymExpr::Add`] and the factors of an [`SymExpr::Mul`] may
//! appear in any order. Strict equality never reports false positives: strictly equal
//! expressions are always semantically equal. The reverse does not hold; `x^2 + 2x + 1` and
//! `(x + 1)^2` are not strictly equal.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement strict equality.

mod fmt;

use crate::primitive::{float_from_str, int, int_from_str};
use eqn_parser::parser::{
    ast::{Expr as AstExpr, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{Float, Integer};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg};
use super::simplify::fraction::make_fraction;

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sqrt(x)` or `f(x, y)`.
    Call(String, Vec<SymExpr>),
}

/// This module never produces non-normal [`Float`]s (such as `NaN` or `Infinity`), so the
/// [`PartialEq`] implementation for [`Primary`] is a full equivalence relation.
impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Add`].
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in an [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// An algebraic expression in flattened sum-of-products form.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl SymExpr {
    /// Creates an expression containing the given integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Primary(Primary::Integer(int(n)))
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<Integer> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is the integer `n`.
    pub fn is_integer_eq(&self, n: i32) -> bool {
        self.as_integer().map_or(false, |int| *int == n)
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference
    /// to the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&Integer> {
        match self {
            Self::Exp(base, exp) if exp.is_integer_eq(-1) => base.as_integer(),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns the
    /// contained integer (the denominator of the fraction).
    pub fn into_integer_recip(self) -> Option<Integer> {
        match self {
            Self::Exp(base, exp) if exp.is_integer_eq(-1) => base.into_integer(),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(float)) => Some(float),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`] or a [`Primary::Float`].
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// Returns the terms of the expression: the children of an [`SymExpr::Add`], or the
    /// expression itself.
    pub fn into_terms(self) -> Vec<SymExpr> {
        match self {
            Self::Add(terms) => terms,
            expr => vec![expr],
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or an [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }
}

impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt::to_ast(self).fmt(f)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                if lhs.len() != rhs.len() {
                    return false;
                }

                // match each child with a distinct child on the other side
                let mut unmatched = rhs.iter().collect::<Vec<_>>();
                lhs.iter().all(|child| {
                    match unmatched.iter().position(|other| *other == child) {
                        Some(idx) => {
                            unmatched.swap_remove(idx);
                            true
                        },
                        None => false,
                    }
                })
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::Float(float_from_str(&float.value))),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(paren.into_innermost()),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::from(*bin.lhs);
                let rhs = Self::from(*bin.rhs);
                match bin.op.kind {
                    BinOpKind::Exp => Self::Exp(Box::new(lhs), Box::new(rhs)),
                    // flattening happens in the `Mul` and `Add` implementations
                    BinOpKind::Mul => lhs * rhs,
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Add => lhs + rhs,
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => lhs + rhs.neg(),
                }
            },
        }
    }
}

impl From<SymExpr> for AstExpr {
    fn from(expr: SymExpr) -> Self {
        fmt::to_ast(&expr)
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined in
/// one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(terms)) => {
                let mut new_terms = Vec::with_capacity(terms.len() + 1);
                new_terms.push(other);
                new_terms.extend(terms);
                Self::Add(new_terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Add(Vec::new()));
        *self = lhs + rhs;
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are combined
/// in one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(factors)) => {
                let mut new_factors = Vec::with_capacity(factors.len() + 1);
                new_factors.push(other);
                new_factors.extend(factors);
                Self::Mul(new_factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        let lhs = std::mem::replace(self, Self::Mul(Vec::new()));
        *self = lhs * rhs;
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::integer(-1) * expr,
        }
    }
}

/// Terms and factors keep their source order in these tests, but strict equality would accept
/// any order.
#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::Primary(Primary::Symbol(name.to_string()))
    }

    fn pow(base: SymExpr, exp: SymExpr) -> SymExpr {
        SymExpr::Exp(Box::new(base), Box::new(exp))
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn strict_equality_counts_duplicates() {
        assert_ne!(parse_expr("x + x + y"), parse_expr("x + y + y"));
    }

    #[test]
    fn polynomial() {
        let expr = parse_expr("x^2 + 5x + 6");
        assert_eq!(expr, SymExpr::Add(vec![
            pow(sym("x"), SymExpr::integer(2)),
            SymExpr::Mul(vec![SymExpr::integer(5), sym("x")]),
            SymExpr::integer(6),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        let expr = parse_expr("x - y/3");
        assert_eq!(expr, SymExpr::Add(vec![
            sym("x"),
            SymExpr::Mul(vec![
                SymExpr::integer(-1),
                sym("y"),
                pow(SymExpr::integer(3), SymExpr::integer(-1)),
            ]),
        ]));
    }

    #[test]
    fn negative_literal_folds() {
        assert_eq!(parse_expr("-4"), SymExpr::integer(-4));
        assert_eq!(parse_expr("-x"), SymExpr::Mul(vec![SymExpr::integer(-1), sym("x")]));
    }

    #[test]
    fn calls_keep_arguments() {
        let expr = parse_expr("f(x, 2y)");
        assert_eq!(expr, SymExpr::Primary(Primary::Call("f".to_string(), vec![
            sym("x"),
            SymExpr::Mul(vec![SymExpr::integer(2), sym("y")]),
        ])));
    }
}
