use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    fmt::Latex,
    token::op::{UnaryOp, UnaryOpKind},
    Parse,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

/// A unary operation, such as `-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    /// The operand of the unary operation.
    pub operand: Box<Expr>,

    /// The unary operator.
    pub op: UnaryOp,

    /// The region of the source code that this unary operation was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Builds the negation of the given expression, parenthesizing it if needed.
    pub fn negate(operand: Expr) -> Self {
        Self {
            operand: Box::new(operand.wrap_below(Precedence::Neg)),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..0 },
            span: 0..0,
        }
    }

    /// Returns the span of the unary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;

        // only exponentiation binds tighter than negation: `-x^2` is `-(x^2)`
        let operand = Expr::parse_operand(input)?;
        let operand = Binary::parse_expr(input, operand, Precedence::Exp)?;

        Ok(Self {
            span: op.span.start..operand.span().end,
            operand: Box::new(operand),
            op,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.op.fmt_latex(f)?;
        self.operand.fmt_latex(f)
    }
}
