//! Simplification of expressions to a canonical, lower-complexity form.
//!
//! Simplification works bottom-up: the children of an expression are simplified before the
//! expression itself, and after every successful rewrite the whole tree is examined again, until
//! no rule applies anywhere. The result is therefore a fixed point: simplifying it again returns
//! it unchanged.

pub mod fraction;
pub mod rules;
pub mod step;

use super::{expr::{Primary, SymExpr}, step_collector::StepCollector};
pub use step::Step;

/// Upper bound on the number of rewrites applied to a single expression.
const MAX_REWRITES: usize = 10_000;

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, returning the simplified expression and the steps taken.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = simplify_with(expr, &mut steps);
    (expr, steps)
}

/// Simplifies the given expression, reporting each applied rule to the step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut expr = expr.clone();
    for _ in 0..MAX_REWRITES {
        match rewrite_once(&expr, step_collector) {
            Some(next) => expr = next,
            None => break,
        }
    }
    expr
}

/// Rewrites the first child that can be simplified, and rebuilds the parent around it.
fn rewrite_children(
    children: &[SymExpr],
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<(usize, SymExpr)> {
    children.iter()
        .enumerate()
        .find_map(|(idx, child)| rewrite_once(child, step_collector).map(|child| (idx, child)))
}

/// Applies a single rule somewhere in the expression, innermost expressions first. Returns `None`
/// if the expression is fully simplified.
fn rewrite_once(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let rewritten = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            rewrite_children(args, step_collector).map(|(idx, arg)| {
                let mut args = args.clone();
                args[idx] = arg;
                SymExpr::Primary(Primary::Call(name.clone(), args))
            })
        },
        SymExpr::Primary(_) => None,
        SymExpr::Add(terms) => {
            rewrite_children(terms, step_collector).map(|(idx, term)| {
                // re-flatten, in case the term became a sum
                terms.iter()
                    .enumerate()
                    .map(|(i, other)| if i == idx { term.clone() } else { other.clone() })
                    .fold(SymExpr::Add(Vec::new()), |sum, term| sum + term)
                    .downgrade()
            })
        },
        SymExpr::Mul(factors) => {
            rewrite_children(factors, step_collector).map(|(idx, factor)| {
                factors.iter()
                    .enumerate()
                    .map(|(i, other)| if i == idx { factor.clone() } else { other.clone() })
                    .fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor)
                    .downgrade()
            })
        },
        SymExpr::Exp(base, exp) => {
            rewrite_once(base, step_collector)
                .map(|base| SymExpr::Exp(Box::new(base), exp.clone()))
                .or_else(|| {
                    rewrite_once(exp, step_collector)
                        .map(|exp| SymExpr::Exp(base.clone(), Box::new(exp)))
                })
        },
    };

    rewritten.or_else(|| rules::all(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        let expr = SymExpr::from(Parser::new(input).try_parse_full::<AstExpr>().unwrap());
        simplify(&expr).to_string()
    }

    #[test]
    fn cancel_division() {
        assert_eq!(simplified("2*x/2"), "x");
        assert_eq!(simplified("4/2"), "2");
    }

    #[test]
    fn collect_terms() {
        assert_eq!(simplified("x + x + x"), "3x");
        assert_eq!(simplified("x^2 + 5x + 6 - x^2"), "5x + 6");
        assert_eq!(simplified("x - x"), "0");
    }

    #[test]
    fn collect_factors() {
        assert_eq!(simplified("x * x"), "x^2");
        assert_eq!(simplified("x^3/x"), "x^2");
        assert_eq!(simplified("x/x"), "1");
    }

    #[test]
    fn distribute_and_reduce() {
        assert_eq!(simplified("(x^2 - 4)/2"), "x^2/2 - 2");
        assert_eq!(simplified("3(x + 1) - 3"), "3x");
    }

    #[test]
    fn fractions() {
        assert_eq!(simplified("1/2 + 1/3"), "5/6");
        assert_eq!(simplified("x/2 + x/2"), "x");
        assert_eq!(simplified("0.5 + 1/4"), "0.75");
    }

    #[test]
    fn inside_calls() {
        assert_eq!(simplified("sqrt(x + x)"), "sqrt(2x)");
    }

    #[test]
    fn steps_are_recorded() {
        let expr = SymExpr::from(Parser::new("x + 0").try_parse_full::<AstExpr>().unwrap());
        let (expr, steps) = simplify_with_steps(&expr);
        assert_eq!(expr.to_string(), "x");
        assert_eq!(steps, vec![Step::AddZero]);
    }

    #[test]
    fn idempotent() {
        for input in ["(x^2 - 4)/2", "3x/2 + y - 7", "-(x + 1)^2", "2.5x * 4"] {
            let once = simplified(input);
            assert_eq!(simplified(&once), once, "input: {}", input);
        }
    }
}
