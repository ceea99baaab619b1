use crate::{
    parser::{
        ast::{expr::Expr, paren::Paren},
        error::Error,
        fmt::{fmt_pow, Latex},
        token::op::{BinOp, BinOpKind},
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Returns the binary operator a token stands for, if any.
fn op_kind(kind: TokenKind) -> Option<BinOpKind> {
    match kind {
        TokenKind::Exp | TokenKind::DoubleStar => Some(BinOpKind::Exp),
        TokenKind::Mul => Some(BinOpKind::Mul),
        TokenKind::Div => Some(BinOpKind::Div),
        TokenKind::Add => Some(BinOpKind::Add),
        TokenKind::Sub => Some(BinOpKind::Sub),
        _ => None,
    }
}

/// A binary operation, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left-hand side of the binary operation.
    pub lhs: Box<Expr>,

    /// The operator of the binary operation.
    pub op: BinOp,

    /// The right-hand side of the binary operation.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary operation was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Builds a binary operation from two existing expressions, parenthesizing either operand
    /// where the result would otherwise read back differently.
    pub fn synthetic(lhs: Expr, kind: BinOpKind, rhs: Expr) -> Self {
        let precedence = kind.precedence();
        let wrap_lhs = lhs.precedence().map_or(false, |p| {
            p < precedence || (p == precedence && kind.associativity() == Associativity::Right)
        });
        let wrap_rhs = rhs.precedence().map_or(false, |p| {
            p < precedence || (p == precedence && kind.is_anticommutative())
        });

        let wrap = |expr: Expr, needed: bool| if needed {
            Expr::Paren(Paren::wrap(expr))
        } else {
            expr
        };

        Self {
            lhs: Box::new(wrap(lhs, wrap_lhs)),
            op: BinOp::synthetic(kind),
            rhs: Box::new(wrap(rhs, wrap_rhs)),
            span: 0..0,
        }
    }

    /// Returns the span of the binary operation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand side of a binary expression, keeps consuming operators and
    /// right-hand sides as long as they bind at least as tightly as `min`.
    ///
    /// A name or an opening parenthesis directly after an operand is an implicit multiplication,
    /// as in `2x` or `3(x + 1)`.
    pub(crate) fn parse_expr(
        input: &mut Parser,
        lhs: Expr,
        min: Precedence,
    ) -> Result<Expr, Error> {
        let mut lhs = lhs;

        loop {
            let next = input.peek_kind();
            let op = if let Some(kind) = next.and_then(op_kind) {
                if kind.precedence() < min {
                    break;
                }
                input.try_parse::<BinOp>()?
            } else if matches!(next, Some(TokenKind::Name | TokenKind::OpenParen)) {
                if Precedence::Factor < min {
                    break;
                }
                let end = lhs.span().end;
                BinOp { kind: BinOpKind::Mul, implicit: true, span: end..end }
            } else {
                break;
            };

            let rhs_min = match op.associativity() {
                Associativity::Left => op.precedence().next(),
                Associativity::Right => op.precedence(),
            };
            let rhs = Expr::parse_operand(input)?;
            let rhs = Self::parse_expr(input, rhs, rhs_min)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }

    /// Returns true if a space must separate the operands of an implicit multiplication, so that
    /// `x y` does not read back as the single symbol `xy`, or `x (y)` as a call.
    fn needs_space(&self) -> bool {
        if self.lhs.is_number() {
            return false;
        }
        match self.rhs.as_ref() {
            Expr::Paren(_) => self.lhs.ends_with_name(),
            _ => true,
        }
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt(f)?;
        if self.op.implicit && self.needs_space() {
            write!(f, " ")?;
        }
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => fmt_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            _ => {
                self.lhs.fmt_latex(f)?;
                self.op.fmt_latex(f)?;
                self.rhs.fmt_latex(f)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parser::Parser;

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn synthetic_wraps_looser_operands() {
        let sum = Binary::synthetic(parse("x^2"), BinOpKind::Sub, parse("4"));
        let quotient = Binary::synthetic(Expr::Binary(sum), BinOpKind::Div, parse("2"));
        assert_eq!(quotient.to_string(), "(x^2 - 4)/2");
    }

    #[test]
    fn synthetic_keeps_tighter_operands() {
        let product = Binary::synthetic(parse("2*x"), BinOpKind::Add, parse("3*y"));
        assert_eq!(product.to_string(), "2*x + 3*y");
    }

    #[test]
    fn synthetic_right_operand_of_subtraction() {
        let difference = Binary::synthetic(parse("x"), BinOpKind::Sub, parse("y - 1"));
        assert_eq!(difference.to_string(), "x - (y - 1)");

        let quotient = Binary::synthetic(parse("x"), BinOpKind::Div, parse("2*y"));
        assert_eq!(quotient.to_string(), "x/(2*y)");
    }

    #[test]
    fn synthetic_power_base() {
        let power = Binary::synthetic(parse("-x"), BinOpKind::Exp, parse("2"));
        assert_eq!(power.to_string(), "(-x)^2");

        let tower = Binary::synthetic(parse("x^2"), BinOpKind::Exp, parse("3"));
        assert_eq!(tower.to_string(), "(x^2)^3");
    }

    #[test]
    fn synthetic_reparses_to_same_text() {
        let built = Binary::synthetic(parse("x + 1"), BinOpKind::Mul, parse("x - 1"));
        let text = built.to_string();
        assert_eq!(text, "(x + 1)*(x - 1)");
        assert_eq!(parse(&text).to_string(), text);
    }
}
