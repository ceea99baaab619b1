//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::float;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{
        fraction::{as_float, extract_integer_fraction, make_fraction},
        rules::do_multiply,
        step::Step,
    },
    step_collector::StepCollector,
};

/// Returns true if the factor divides by zero, as in `0^-1`.
fn is_zero_denominator(factor: &SymExpr) -> bool {
    match factor {
        SymExpr::Exp(base, exp) => {
            base.is_integer_eq(0) && exp.as_integer().map_or(false, |n| *n < 0)
        },
        _ => false,
    }
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(is_zero_denominator) {
            return None;
        }

        if factors.iter().any(|factor| factor.is_integer_eq(0)) {
            Some(SymExpr::integer(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_integer_eq(1))
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Simplifies numerical fractions, moving the sign into the numerator.
///
/// `3/12 = 1/4`
/// `12/3 = 4`
/// `2/-3 = -2/3`
pub fn reduce_numerical_fraction(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();

        // extract an Integer and an Integer^-1
        let (numerator, denominator) = extract_integer_fraction(&mut new_factors, false)?;
        if denominator == 0 {
            return None;
        }

        let mut gcd = numerator.clone().gcd(&denominator);
        if gcd == 1 && denominator > 0 {
            return None;
        }
        if denominator < 0 {
            gcd = -gcd;
        }

        let numerator = SymExpr::Primary(Primary::Integer(numerator / &gcd));
        let denominator = denominator / &gcd;

        // insert the reduced fraction back into the factors
        let fraction = if denominator == 1 {
            numerator
        } else {
            make_fraction(numerator, SymExpr::Primary(Primary::Integer(denominator)))
        };
        Some((SymExpr::Mul(new_factors) * fraction).downgrade())
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Multiplies a float with the other numbers of a product, so that the product has a single
/// numeric factor.
///
/// `2*0.5*x = 1.0*x`
pub fn fold_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let is_numeric = |factor: &SymExpr| factor.is_number() || factor.is_integer_recip();
        if !factors.iter().any(SymExpr::is_float)
            || factors.iter().filter(|factor| is_numeric(*factor)).count() < 2 {
            return None;
        }

        let mut product = float(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match is_numeric(factor).then(|| as_float(factor)).flatten() {
                Some(value) => product *= value,
                None => new_factors.push(factor.clone()),
            }
        }

        new_factors.insert(0, SymExpr::Primary(Primary::Float(product)));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// Utility function to extract the base and exponent of an expression. If the expression is not
/// [`SymExpr::Exp`], the exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
        expr => (expr.clone(), SymExpr::integer(1)),
    }
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `2^c*3^c = 6^c`
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_factor_idx = 0;

        // O(n^2) worst case, due to scanning the whole vec for each factor
        while current_factor_idx < new_factors.len() {
            let (mut current_factor, mut current_factor_exp) = get_exp(&new_factors[current_factor_idx]);
            let mut combined = false;

            // look at every factor after `current_factor`
            let mut next_factor_idx = current_factor_idx + 1;
            while next_factor_idx < new_factors.len() {
                let (next_factor, next_factor_exp) = get_exp(&new_factors[next_factor_idx]);

                if current_factor_exp == next_factor_exp
                    && (current_factor.is_integer() && next_factor.is_integer()
                        || current_factor.is_float() && next_factor.is_float()) {
                    // numbers with strictly equal exponents: a^c*b^c = (a*b)^c
                    current_factor *= next_factor;
                    new_factors.remove(next_factor_idx);
                    combined = true;
                } else if current_factor == next_factor {
                    // strictly equal bases: a^b*a^c = a^(b+c)
                    current_factor_exp += next_factor_exp;
                    new_factors.remove(next_factor_idx);
                    combined = true;
                } else {
                    next_factor_idx += 1;
                }
            }

            if combined {
                new_factors[current_factor_idx] = if current_factor_exp.is_integer_eq(1) {
                    current_factor
                } else {
                    SymExpr::Exp(Box::new(current_factor), Box::new(current_factor_exp))
                };
            }

            current_factor_idx += 1;
        }

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules reduce the number of factors of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| reduce_numerical_fraction(expr, step_collector))
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
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
    fn zero_factor() {
        assert_eq!(multiply_zero(&parse_expr("0 * x * y"), &mut ()), Some(SymExpr::integer(0)));
        assert_eq!(multiply_zero(&parse_expr("0 * 0^-1"), &mut ()), None);
    }

    #[test]
    fn one_factor() {
        assert_eq!(multiply_one(&parse_expr("1 * x"), &mut ()), Some(parse_expr("x")));
    }

    #[test]
    fn reduce_fraction() {
        let expr = reduce_numerical_fraction(&parse_expr("6x/4"), &mut ()).unwrap();
        assert_eq!(expr.to_string(), "3x/2");

        let expr = reduce_numerical_fraction(&parse_expr("12/3"), &mut ()).unwrap();
        assert_eq!(expr, SymExpr::integer(4));

        let expr = reduce_numerical_fraction(&parse_expr("2/(-3)"), &mut ()).unwrap();
        assert_eq!(expr.to_string(), "-2/3");
    }

    #[test]
    fn like_factors() {
        let expr = combine_like_factors(&parse_expr("x * y * x^2"), &mut ()).unwrap();
        assert_eq!(expr.to_string(), "x^3*y");
    }

    #[test]
    fn float_coefficients() {
        let expr = fold_numbers(&parse_expr("2 * 0.25 * x"), &mut ()).unwrap();
        assert_eq!(expr.to_string(), "0.5x");
    }
}
