//! Symbolic manipulation of single-variable (or multi-variable) algebraic equations.
//!
//! An [`Equation`] is a pair of [`Expression`]s that keep the exact shape they were written or
//! built in. Commands such as "divide by 2" build new sides with [`Expression::combine`] without
//! evaluating anything; the result is only rewritten when [`Equation::simplify`] runs the rules in
//! [`symbolic::simplify`].
//!
//! ```
//! use eqn_compute::{CombineOp, Equation, Expression};
//!
//! let equation = Equation::parse("2x = 4").unwrap();
//! let two = Expression::parse("2").unwrap();
//! let divided = Equation::new(
//!     equation.lhs.combine(&two, CombineOp::Divide),
//!     equation.rhs.combine(&two, CombineOp::Divide),
//! );
//! assert_eq!(divided.to_string(), "2x/2 = 4/2");
//! assert_eq!(divided.simplify().to_string(), "x = 2");
//! ```

pub mod backend;
pub mod equation;
pub mod expression;
pub mod primitive;
pub mod render;
pub mod symbolic;

pub use backend::{CasBackend, SymbolicBackend};
pub use equation::Equation;
pub use expression::{CombineOp, Expression};
pub use render::{Displayable, PlainRenderer, RenderError, Renderer};
