//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power}, step::Step},
    step_collector::StepCollector,
};

/// Distributes a numeric coefficient over a sum.
///
/// `2(a + b) = 2a + 2b`
/// `(a + b)/2 = a/2 + b/2`
///
/// Products of a sum with anything non-numeric are left factored.
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let idx = factors.iter().position(|factor| matches!(factor, SymExpr::Add(_)))?;
        let mut coefficient = factors.to_vec();
        let SymExpr::Add(terms) = coefficient.remove(idx) else {
            return None;
        };

        let is_numeric = coefficient.iter()
            .all(|factor| factor.is_number() || factor.is_integer_recip());
        if !is_numeric {
            return None;
        }

        let new_terms = terms.into_iter()
            .map(|term| SymExpr::Mul(coefficient.clone()) * term)
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`, for integer `c`
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !rhs.is_integer() {
            return None;
        }

        if let SymExpr::Mul(factors) = lhs {
            let new_factors = factors.iter()
                .map(|factor| SymExpr::Exp(
                    Box::new(factor.clone()),
                    Box::new(rhs.clone()),
                ))
                .collect::<Vec<_>>();

            return Some(SymExpr::Mul(new_factors));
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// Distribution may increase the size of the expression, but it exposes like terms to the
/// addition rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> SymExpr {
        SymExpr::from(Parser::new(input).try_parse_full::<AstExpr>().unwrap())
    }

    #[test]
    fn numeric_coefficient() {
        let expr = distributive_property(&parse_expr("2(x + y)"), &mut ()).unwrap();
        assert_eq!(expr, parse_expr("2x + 2y"));
    }

    #[test]
    fn symbolic_coefficient_stays_factored() {
        assert_eq!(distributive_property(&parse_expr("x*(x + 1)"), &mut ()), None);
    }

    #[test]
    fn power_of_product() {
        let expr = distribute_power(&parse_expr("(2x)^2"), &mut ()).unwrap();
        assert_eq!(expr, parse_expr("2^2 * x^2"));
    }
}
