//! Application of parsed commands to an equation.

use crate::{command::{Operation, Verb}, error::CommandError, side::Side};
use eqn_compute::{CombineOp, Equation, Expression, SymbolicBackend};
use serde::Deserialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Which combinator the `multiply`, `add` and `subtract` verbs use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Every verb uses the combinator it is named after.
    #[default]
    Named,

    /// Every combining verb divides, whatever its name.
    Division,
}

impl CombineMode {
    /// Returns the combinator to use for a verb named after `named`.
    pub fn combinator(self, named: CombineOp) -> CombineOp {
        match self {
            Self::Named => named,
            Self::Division => CombineOp::Divide,
        }
    }
}

/// The name of a combine mode was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown combine mode `{0}`, expected `named` or `division`")]
pub struct UnknownCombineMode(pub String);

impl FromStr for CombineMode {
    type Err = UnknownCombineMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "named" => Ok(Self::Named),
            "division" => Ok(Self::Division),
            _ => Err(UnknownCombineMode(s.to_string())),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Named => write!(f, "named"),
            Self::Division => write!(f, "division"),
        }
    }
}

/// Computes the equation that results from applying `operation` to `equation`.
///
/// The input equation is never modified; on error, the caller keeps it as is.
pub fn apply(
    equation: &Equation,
    operation: &Operation,
    backend: &dyn SymbolicBackend,
    mode: CombineMode,
) -> Result<Equation, CommandError> {
    let argument = operation.argument.as_deref().unwrap_or_default();

    match operation.verb {
        Verb::Set => backend.parse_equation(argument)
            .map_err(CommandError::invalid_expression),
        Verb::Simplify => Ok(backend.simplify_equation(equation)),
        Verb::Unrecognized => Err(CommandError::UnrecognizedCommand),
        Verb::Divide => combine_sides(equation, operation, backend, mode.combinator(CombineOp::Divide)),
        Verb::Multiply => combine_sides(equation, operation, backend, mode.combinator(CombineOp::Multiply)),
        Verb::Add => combine_sides(equation, operation, backend, mode.combinator(CombineOp::Add)),
        Verb::Subtract => combine_sides(equation, operation, backend, mode.combinator(CombineOp::Subtract)),
    }
}

/// Combines the operation's factor into the sides it targets.
fn combine_sides(
    equation: &Equation,
    operation: &Operation,
    backend: &dyn SymbolicBackend,
    op: CombineOp,
) -> Result<Equation, CommandError> {
    let argument = operation.argument.as_deref().unwrap_or_default();
    let factor = backend.parse_factor(argument)
        .map_err(CommandError::invalid_factor)?;

    let combine = |side: &Expression| backend.combine(side, &factor, op);
    Ok(match operation.side {
        Side::Both => Equation::new(combine(&equation.lhs), combine(&equation.rhs)),
        Side::Left => Equation::new(combine(&equation.lhs), equation.rhs.clone()),
        Side::Right => Equation::new(equation.lhs.clone(), combine(&equation.rhs)),
    })
}
