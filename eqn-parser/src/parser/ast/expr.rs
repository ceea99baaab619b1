use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            literal::{LitSym, Literal},
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        fmt::Latex,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single literal.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sqrt(x)`.
    Call(Call),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// If this expression is an [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        match self {
            Expr::Paren(paren) => paren.innermost(),
            expr => expr,
        }
    }

    /// Returns the precedence of the top-level operation of this expression, or [`None`] if the
    /// expression is atomic (a literal, call, or parenthesized expression).
    pub fn precedence(&self) -> Option<Precedence> {
        match self {
            Expr::Unary(unary) => Some(unary.op.precedence()),
            Expr::Binary(binary) => Some(binary.op.precedence()),
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_) => None,
        }
    }

    /// Returns true if the expression is a numeric literal.
    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Literal(literal) if literal.is_number())
    }

    /// Returns true if the last token of the expression, when displayed, is a symbol name.
    pub(crate) fn ends_with_name(&self) -> bool {
        match self {
            Expr::Literal(Literal::Symbol(_)) => true,
            Expr::Unary(unary) => unary.operand.ends_with_name(),
            Expr::Binary(binary) => binary.rhs.ends_with_name(),
            Expr::Literal(_) | Expr::Paren(_) | Expr::Call(_) => false,
        }
    }

    /// Wraps the expression in parentheses if its top-level operation binds looser than `min`.
    pub fn wrap_below(self, min: Precedence) -> Expr {
        match self.precedence() {
            Some(precedence) if precedence < min => Expr::Paren(Paren::wrap(self)),
            _ => self,
        }
    }

    /// Parses a unary expression or a primary expression: anything that can be the operand of a
    /// binary operator.
    pub(crate) fn parse_operand(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Sub) => Unary::parse(input).map(Expr::Unary),
            _ => Self::parse_primary(input),
        }
    }

    fn parse_primary(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::OpenParen) => Paren::parse(input).map(Expr::Paren),
            Some(TokenKind::Name) => {
                let name = LitSym::parse(input)?;
                if input.is_adjacent(TokenKind::OpenParen) {
                    Call::parse_args(input, name).map(Expr::Call)
                } else {
                    Ok(Expr::Literal(Literal::Symbol(name)))
                }
            },
            Some(TokenKind::CloseParen) => Err(input.error(kind::UnclosedParenthesis {
                opening: false,
            })),
            _ => Literal::parse(input).map(Expr::Literal),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Self::parse_operand(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

impl Latex for Expr {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt_latex(f),
            Expr::Paren(paren) => paren.fmt_latex(f),
            Expr::Call(call) => call.fmt_latex(f),
            Expr::Unary(unary) => unary.fmt_latex(f),
            Expr::Binary(binary) => binary.fmt_latex(f),
        }
    }
}
