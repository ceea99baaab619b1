//! Tokenizer and parser for the algebraic expressions and equations manipulated by voice and text
//! commands.
//!
//! The parser is deliberately **non-evaluating**: the produced [`parser::ast::Expr`] tree keeps
//! the exact shape of the input, including parentheses and operand order, so that `2*x/2` stays
//! `2*x/2` until it is explicitly simplified.
//!
//! ```
//! use eqn_parser::parser::{ast::Equation, Parser};
//!
//! let equation = Parser::new("x^2 = 4").try_parse_full::<Equation>().unwrap();
//! assert_eq!(equation.to_string(), "x^2 = 4");
//! ```

pub mod parser;
pub mod tokenizer;
