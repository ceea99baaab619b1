//! The abstract syntax tree of an expression or equation.
//!
//! Nodes keep the exact shape of the parsed source (parentheses included) along with the span of
//! source code they were parsed from. Nodes built programmatically carry the empty span `0..0`.

pub mod binary;
pub mod call;
pub mod equation;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use equation::Equation;
pub use expr::Expr;
pub use literal::{LitFloat, LitInt, LitSym, Literal};
pub use paren::Paren;
pub use unary::Unary;
