use crate::{equation::Equation, expression::{CombineOp, Expression}};
use eqn_error::Error;

/// The symbolic-math services needed to carry out commands on an equation.
///
/// The session layer only talks to a backend through this trait, so that the computer algebra
/// implementation can be swapped out (or replaced with a fake in tests).
pub trait SymbolicBackend: Send + Sync {
    /// Parses a complete equation, such as `x^2 = 4`.
    fn parse_equation(&self, source: &str) -> Result<Equation, Error>;

    /// Parses a single expression, used as the factor of a combining command.
    fn parse_factor(&self, source: &str) -> Result<Expression, Error>;

    /// Simplifies both sides of the equation jointly.
    fn simplify_equation(&self, equation: &Equation) -> Equation;

    /// Builds `target <op> factor` without simplifying it.
    fn combine(&self, target: &Expression, factor: &Expression, op: CombineOp) -> Expression;
}

/// The backend built on this crate's parser and simplifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct CasBackend;

impl SymbolicBackend for CasBackend {
    fn parse_equation(&self, source: &str) -> Result<Equation, Error> {
        Equation::parse(source)
    }

    fn parse_factor(&self, source: &str) -> Result<Expression, Error> {
        Expression::parse(source)
    }

    fn simplify_equation(&self, equation: &Equation) -> Equation {
        equation.simplify()
    }

    fn combine(&self, target: &Expression, factor: &Expression, op: CombineOp) -> Expression {
        target.combine(factor, op)
    }
}
