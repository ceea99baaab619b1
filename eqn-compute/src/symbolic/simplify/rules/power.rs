//! Simplification rules for powers.

use crate::primitive::float;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{fraction::make_fraction, rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::ops::Pow;

/// Exponents larger than this are left unevaluated.
const MAX_EVALUATED_EXPONENT: u32 = 256;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        rhs.is_integer_eq(0).then(|| SymExpr::integer(1))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.is_integer_eq(1).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        lhs.is_integer_eq(1).then(|| SymExpr::integer(1))
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, for positive integer `a`
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let positive = rhs.as_integer().map_or(false, |n| *n > 0);
        (lhs.is_integer_eq(0) && positive).then(|| SymExpr::integer(0))
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Evaluates numbers raised to integer powers. Negative powers of integers stay exact fractions.
///
/// `2^3 = 8`
/// `2^-3 = 1/8`
/// `0.5^2 = 0.25`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let exp = rhs.as_integer()?.to_i32()?;
        if exp.unsigned_abs() > MAX_EVALUATED_EXPONENT {
            return None;
        }

        match lhs {
            SymExpr::Primary(Primary::Integer(base)) => {
                if exp == -1 || (exp < 0 && *base == 0) {
                    // `n^-1` is how fractions are represented
                    return None;
                }

                let value = SymExpr::Primary(Primary::Integer(base.clone().pow(exp.unsigned_abs())));
                if exp < 0 {
                    Some(make_fraction(SymExpr::integer(1), value))
                } else {
                    Some(value)
                }
            },
            SymExpr::Primary(Primary::Float(base)) => {
                if exp < 0 && base.is_zero() {
                    return None;
                }
                Some(SymExpr::Primary(Primary::Float(float(base.clone().pow(exp)))))
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, for integer `c`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !rhs.is_integer() {
            return None;
        }

        if let SymExpr::Exp(base, exp) = lhs {
            return Some(SymExpr::Exp(
                base.clone(),
                Box::new((**exp).clone() * rhs.clone()),
            ));
        }

        None
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}
