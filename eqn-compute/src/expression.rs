//! The immutable symbolic value manipulated by commands.

use crate::symbolic::{simplify, SymExpr};
use eqn_error::Error;
use eqn_parser::parser::{
    ast::{Binary, Expr as AstExpr},
    fmt::Latex,
    token::op::BinOpKind,
    Parser,
};
use std::fmt;

/// The arithmetic operation used to combine an expression with a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// `expression / factor`
    Divide,

    /// `expression * factor`
    Multiply,

    /// `expression + factor`
    Add,

    /// `expression - factor`
    Subtract,
}

impl From<CombineOp> for BinOpKind {
    fn from(op: CombineOp) -> Self {
        match op {
            CombineOp::Divide => BinOpKind::Div,
            CombineOp::Multiply => BinOpKind::Mul,
            CombineOp::Add => BinOpKind::Add,
            CombineOp::Subtract => BinOpKind::Sub,
        }
    }
}

/// A symbolic expression in unevaluated form.
///
/// Parsing keeps the expression exactly as written (`2*x/2` is not reduced to `x`), and
/// [`Expression::combine`] builds on it without evaluating anything. Only
/// [`Expression::simplify`] rewrites it.
///
/// Two expressions are equal if they are written the same way.
#[derive(Debug, Clone)]
pub struct Expression {
    ast: AstExpr,
}

impl Expression {
    /// Parses an expression. Equality signs are not allowed.
    pub fn parse(source: &str) -> Result<Self, Error> {
        Parser::new(source).try_parse_full::<AstExpr>().map(Self::from)
    }

    /// Returns the AST of the expression.
    pub fn as_ast(&self) -> &AstExpr {
        &self.ast
    }

    /// Returns the flattened symbolic form of the expression.
    pub fn to_sym(&self) -> SymExpr {
        SymExpr::from(self.ast.clone())
    }

    /// Returns the simplified form of the expression.
    pub fn simplify(&self) -> Self {
        Self::from(simplify(&self.to_sym()))
    }

    /// Combines this expression with `factor`, as in `self / factor`. Parentheses are added
    /// around either operand only where they are needed to keep the meaning.
    pub fn combine(&self, factor: &Expression, op: CombineOp) -> Self {
        let binary = Binary::synthetic(self.ast.clone(), op.into(), factor.ast.clone());
        Self { ast: AstExpr::Binary(binary) }
    }
}

impl From<AstExpr> for Expression {
    fn from(ast: AstExpr) -> Self {
        Self { ast }
    }
}

impl From<SymExpr> for Expression {
    fn from(expr: SymExpr) -> Self {
        Self { ast: AstExpr::from(expr) }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ast.fmt(f)
    }
}

impl Latex for Expression {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.ast.fmt_latex(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(source: &str) -> Expression {
        Expression::parse(source).unwrap()
    }

    #[test]
    fn parse_is_unevaluated() {
        assert_eq!(expr("2 * x / 2").to_string(), "2*x/2");
        assert_eq!(expr("4/2").to_string(), "4/2");
    }

    #[test]
    fn parse_rejects_equality() {
        assert!(Expression::parse("x = 2").is_err());
        assert!(Expression::parse("").is_err());
    }

    #[test]
    fn combine_without_parentheses() {
        assert_eq!(expr("2*x").combine(&expr("2"), CombineOp::Divide).to_string(), "2*x/2");
        assert_eq!(expr("4").combine(&expr("2"), CombineOp::Divide).to_string(), "4/2");
        assert_eq!(expr("x^2").combine(&expr("3"), CombineOp::Multiply).to_string(), "x^2*3");
    }

    #[test]
    fn combine_with_parentheses() {
        assert_eq!(expr("x + 1").combine(&expr("2"), CombineOp::Divide).to_string(), "(x + 1)/2");
        assert_eq!(expr("x").combine(&expr("y - 1"), CombineOp::Subtract).to_string(), "x - (y - 1)");
        assert_eq!(expr("x - 1").combine(&expr("x + 1"), CombineOp::Multiply).to_string(), "(x - 1)*(x + 1)");
        assert_eq!(expr("x").combine(&expr("2y"), CombineOp::Divide).to_string(), "x/(2y)");
    }

    #[test]
    fn combine_keeps_written_parentheses() {
        assert_eq!(expr("x").combine(&expr("(y)"), CombineOp::Add).to_string(), "x + (y)");
    }

    #[test]
    fn simplify_expression() {
        assert_eq!(expr("2*x/2").simplify(), expr("x"));
        assert_eq!(expr("x + 1").combine(&expr("1"), CombineOp::Subtract).simplify(), expr("x"));
    }

    #[test]
    fn latex() {
        assert_eq!(expr("x + 1").combine(&expr("2"), CombineOp::Divide).as_display().to_string(), "\\frac{x + 1}{2}");
    }
}
