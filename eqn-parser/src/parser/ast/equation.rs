use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    fmt::Latex,
    Parse,
    Parser,
};
use std::{fmt, ops::Range};

/// An equation with exactly one top-level equality sign, such as `x^2 = 4`. Both `=` and `==`
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: Expr,

    /// The right-hand side of the equation.
    pub rhs: Expr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Equation {
    /// Builds an equation from two existing sides.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self { lhs, rhs, span: 0..0 }
    }
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = input.try_parse::<Expr>()?;

        match input.peek_kind() {
            Some(kind) if kind.is_equality() => input.next_token()?,
            _ => return Err(input.error(kind::ExpectedEquation)),
        };

        let rhs = input.try_parse::<Expr>()?;
        if input.peek_kind().map_or(false, |kind| kind.is_equality()) {
            return Err(input.error(kind::ChainedEquality));
        }

        Ok(Self {
            span: lhs.span().start..rhs.span().end,
            lhs,
            rhs,
        })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_latex(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f)
    }
}
