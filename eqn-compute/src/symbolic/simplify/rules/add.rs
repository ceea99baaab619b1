//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{
        fraction::{as_float, as_integer_fraction, extract_fractional, make_fraction},
        rules::do_add,
        step::Step,
    },
    step_collector::StepCollector,
};

/// Adds two numerical coefficients. Exact fractions stay exact; if either side is a float, the
/// sum is a float.
fn add_assign(lhs: &mut SymExpr, rhs: SymExpr) {
    if lhs.is_float() || rhs.is_float() {
        if let (Some(a), Some(b)) = (as_float(lhs), as_float(&rhs)) {
            *lhs = SymExpr::Primary(Primary::Float(a + b));
            return;
        }
    }

    match (as_integer_fraction(lhs), as_integer_fraction(&rhs)) {
        (Some((num1, den1)), Some((num2, den2))) => {
            // (a / b) + (c / d) = (a*d + b*c) / (b*d)
            let numerator = num1 * &den2 + num2 * &den1;
            let denominator = den1 * den2;
            if denominator == 1 {
                *lhs = SymExpr::Primary(Primary::Integer(numerator));
            } else {
                *lhs = make_fraction(
                    SymExpr::Primary(Primary::Integer(numerator)),
                    SymExpr::Primary(Primary::Integer(denominator)),
                );
            }
        },
        _ => *lhs += rhs,
    }
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_integer_eq(0))
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Utility function to extract the numerical coefficient and factors of a term. If the term is
/// not a [`SymExpr::Mul`], the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
fn get_coeff(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => {
            (expr.clone(), SymExpr::integer(1))
        },
        SymExpr::Mul(factors) => {
            let mut factors = factors.clone();
            let fraction = extract_fractional(&mut factors)
                .unwrap_or_else(|| SymExpr::integer(1));
            (fraction, SymExpr::Mul(factors).downgrade())
        },
        SymExpr::Exp(..) if expr.is_integer_recip() => (expr.clone(), SymExpr::integer(1)),
        _ => (SymExpr::integer(1), expr.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `1/2+1/3 = 5/6`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        // O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = get_coeff(&new_terms[current_term_idx]);
            let mut combined = false;

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = get_coeff(&new_terms[next_term_idx]);

                // factors must be strictly equal
                if current_term_factors == next_term_factors {
                    // a*n + a*m = (n+m)*a
                    add_assign(&mut current_term_coeff, next_term_coeff);
                    new_terms.remove(next_term_idx);
                    combined = true;
                } else {
                    next_term_idx += 1;
                }
            }

            if combined {
                new_terms[current_term_idx] = if current_term_coeff.is_integer_eq(1) {
                    current_term_factors
                } else if current_term_factors.is_integer_eq(1) {
                    current_term_coeff
                } else {
                    current_term_coeff * current_term_factors
                };
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules reduce the number of terms of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}
