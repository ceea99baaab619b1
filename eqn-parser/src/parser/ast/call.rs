use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        fmt::Latex,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

/// A function call, such as `sqrt(x)` or `log(x, 2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name of the function being called.
    pub name: LitSym,

    /// The arguments of the call.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,

    /// The region of the source code that the parenthesized arguments were parsed from.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Call {
    /// Parses the parenthesized argument list of a call whose name has already been consumed. The
    /// opening parenthesis must directly follow the name.
    pub(crate) fn parse_args(input: &mut Parser, name: LitSym) -> Result<Self, Error> {
        let open_paren = input.expect(&[TokenKind::OpenParen])?;
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            return Err(input.error(kind::EmptyParenthesis));
        }

        let mut args = vec![input.try_parse::<Expr>()?];
        while input.peek_kind() == Some(TokenKind::Comma) {
            input.next_token()?;
            args.push(input.try_parse::<Expr>()?);
        }

        let close_paren = input.expect(&[TokenKind::CloseParen])
            .map_err(|_| Error::new(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        Ok(Self {
            span: name.span.start..close_paren.span.end,
            paren_span: open_paren.span.start..close_paren.span.end,
            name,
            args,
        })
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;

        // `f (x)` is `f` times `(x)`, not a call
        if !input.is_adjacent(TokenKind::OpenParen) {
            return Err(input.error(kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen],
                found: input.peek_kind().unwrap_or(TokenKind::Whitespace),
            }));
        }

        Self::parse_args(input, name)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut iter = self.args.iter();
        if let Some(arg) = iter.next() {
            arg.fmt(f)?;
            for arg in iter {
                write!(f, ", ")?;
                arg.fmt(f)?;
            }
        }
        write!(f, ")")
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.name.name.as_str(), self.args.as_slice()) {
            ("sqrt", [arg]) => {
                write!(f, "\\sqrt{{")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            ("abs", [arg]) => {
                write!(f, "\\left|")?;
                arg.innermost().fmt_latex(f)?;
                write!(f, "\\right|")
            },
            (name, args) => {
                match name {
                    "sin" | "cos" | "tan" | "log" | "ln" | "exp" => write!(f, "\\{}", name)?,
                    _ => write!(f, "\\mathrm{{{}}}", name)?,
                }
                write!(f, "\\left(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_latex(f)?;
                }
                write!(f, "\\right)")
            },
        }
    }
}
