//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions in this module are represented as a tree of [`SymExpr`] nodes. It's similar to
//! the [`eqn_parser::parser::ast::Expr`] nodes produced by [`eqn_parser`], with the main
//! difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` is represented as a single [`SymExpr::Add`] node
//! with _three_ children, `x`, `y`, and `z`, where the AST has two children, `x` and `(y + z)`.
//! Combining like terms (`x + x = 2x`) is much easier when the terms in question are all at the
//! same level in the tree.
//!
//! Conversion from the AST is lossy: spans and parentheses are dropped, and the result may be
//! arranged differently, but it is semantically equivalent to the original.
//!
//! ```
//! use eqn_compute::symbolic::expr::{Primary, SymExpr};
//! use eqn_parser::parser::{ast::Expr, Parser};
//!
//! let ast_expr = Parser::new("x + (y + z)").try_parse_full::<Expr>().unwrap();
//! let expr: SymExpr = ast_expr.into();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::Primary(Primary::Symbol("x".to_string())),
//!     SymExpr::Primary(Primary::Symbol("y".to_string())),
//!     SymExpr::Primary(Primary::Symbol("z".to_string())),
//! ]));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form by applying the rules in
//! [`simplify::rules`] until none of them applies: combining like terms and factors, reducing
//! numerical fractions, basic power rules, and distributing numeric coefficients.
//!
//! ```
//! use eqn_compute::symbolic::{simplify, SymExpr};
//! use eqn_parser::parser::{ast::Expr, Parser};
//!
//! let ast_expr = Parser::new("x + x + x").try_parse_full::<Expr>().unwrap();
//! let simplified = simplify(&ast_expr.into());
//! assert_eq!(simplified.to_string(), "3x");
//! ```

pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps, Step};
pub use step_collector::StepCollector;
