pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input that the lexer cannot classify is kept as a [`TokenKind::Symbol`], so the parser can
/// point at it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_equation() {
        compare_tokens(
            "x^2 = 4",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "4"),
            ],
        );
    }

    #[test]
    fn python_style_power_and_equality() {
        compare_tokens(
            "x**2==4.5",
            [
                (TokenKind::Name, "x"),
                (TokenKind::DoubleStar, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Eq, "=="),
                (TokenKind::Float, "4.5"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_and_symbols() {
        compare_tokens(
            "3x1 - y $",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Name, "x1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("2 * (x)");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Int,
            TokenKind::Whitespace,
            TokenKind::Mul,
            TokenKind::Whitespace,
            TokenKind::OpenParen,
            TokenKind::Name,
            TokenKind::CloseParen,
        ]);
        assert_eq!(tokens[5].span, 5..6);
    }
}
