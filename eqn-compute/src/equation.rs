use crate::{expression::Expression, symbolic::{simplify, SymExpr}};
use eqn_error::Error;
use eqn_parser::parser::{ast::Equation as AstEquation, fmt::Latex, Parser};
use std::fmt;

/// An ordered pair of expressions representing a presumed equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Expression,

    /// The right-hand side.
    pub rhs: Expression,
}

impl Equation {
    /// Creates an equation from its two sides.
    pub fn new(lhs: Expression, rhs: Expression) -> Self {
        Self { lhs, rhs }
    }

    /// Parses an equation with exactly one top-level `=` (or `==`), such as `x^2 = 4`.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let equation = Parser::new(source).try_parse_full::<AstEquation>()?;
        Ok(Self::new(equation.lhs.into(), equation.rhs.into()))
    }

    /// Simplifies the equation as a whole.
    ///
    /// Each side is simplified, then terms that appear on both sides are cancelled, so that
    /// `x + 3 = y + 3` becomes `x = y`. A side left without terms becomes `0`. Simplifying the
    /// result again leaves it unchanged.
    pub fn simplify(&self) -> Self {
        let mut lhs = simplify(&self.lhs.to_sym());
        let mut rhs = simplify(&self.rhs.to_sym());
        while cancel_common_terms(&mut lhs, &mut rhs) {
            lhs = simplify(&lhs);
            rhs = simplify(&rhs);
        }

        Self::new(lhs.into(), rhs.into())
    }
}

/// Removes the additive terms that are strictly equal on both sides. Returns true if any term was
/// removed.
fn cancel_common_terms(lhs: &mut SymExpr, rhs: &mut SymExpr) -> bool {
    let mut lhs_terms = lhs.clone().into_terms();
    let mut rhs_terms = rhs.clone().into_terms();
    let mut cancelled = false;

    let mut idx = 0;
    while idx < lhs_terms.len() {
        match rhs_terms.iter().position(|term| *term == lhs_terms[idx]) {
            // `0 = 0` has nothing left to cancel
            Some(_) if lhs_terms[idx].is_integer_eq(0) => idx += 1,
            Some(rhs_idx) => {
                lhs_terms.remove(idx);
                rhs_terms.remove(rhs_idx);
                cancelled = true;
            },
            None => idx += 1,
        }
    }

    if cancelled {
        *lhs = SymExpr::Add(lhs_terms).downgrade();
        *rhs = SymExpr::Add(rhs_terms).downgrade();
    }
    cancelled
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Latex for Equation {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.lhs.fmt_latex(f)?;
        write!(f, " = ")?;
        self.rhs.fmt_latex(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(source: &str) -> String {
        Equation::parse(source).unwrap().simplify().to_string()
    }

    #[test]
    fn parse_both_forms() {
        assert_eq!(Equation::parse("x**2 == 4").unwrap().to_string(), "x^2 = 4");
        assert_eq!(Equation::parse("2x=4").unwrap().to_string(), "2x = 4");
    }

    #[test]
    fn parse_requires_one_equality() {
        assert!(Equation::parse("x + 1").is_err());
        assert!(Equation::parse("x = 1 = 2").is_err());
    }

    #[test]
    fn simplify_sides() {
        assert_eq!(simplified("2*x/2 = 4/2"), "x = 2");
        assert_eq!(simplified("x^2 = 4"), "x^2 = 4");
    }

    #[test]
    fn cancel_common_terms_across_sides() {
        assert_eq!(simplified("x + 3 = y + 3"), "x = y");
        assert_eq!(simplified("x + 3 = 3"), "x = 0");
        assert_eq!(simplified("2x + y = 2x"), "y = 0");
        assert_eq!(simplified("x = x"), "0 = 0");
    }

    #[test]
    fn simplify_is_idempotent() {
        for source in ["x + 3 = y + 3", "(x^2 - 4)/2 = 6/4", "x = x", "3(x + 1) = 3 + y"] {
            let once = Equation::parse(source).unwrap().simplify();
            assert_eq!(once.simplify(), once, "source: {}", source);
        }
    }

    #[test]
    fn latex() {
        let equation = Equation::parse("x/2 = 4").unwrap();
        assert_eq!(equation.as_display().to_string(), "\\frac{x}{2} = 4");
    }
}
