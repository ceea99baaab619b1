//! Tools to help manipulate fractions.

use crate::primitive::{float, int};
use crate::symbolic::expr::{Primary, SymExpr};
use rug::{Float, Integer};

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1.
pub(crate) fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator *
        SymExpr::Exp(
            Box::new(denominator),
            Box::new(SymExpr::integer(-1)),
        )
}

/// Extracts a numerical fraction from the factors of a [`SymExpr::Mul`].
///
/// Numerical fractions are represented as a [`Primary::Integer`] numerator, and a
/// [`SymExpr::Exp`] whose base is a [`Primary::Integer`] and whose exponent is `-1`.
///
/// This function finds one factor of each kind, removes them, and returns the numerator and
/// denominator. If `denominator_optional` is `true`, a missing denominator is returned as an
/// implied 1; otherwise both parts must be present.
pub(crate) fn extract_integer_fraction(
    factors: &mut Vec<SymExpr>,
    denominator_optional: bool,
) -> Option<(Integer, Integer)> {
    let numerator_idx = factors.iter().position(SymExpr::is_integer);
    let denominator_idx = factors.iter().position(SymExpr::is_integer_recip);

    match (numerator_idx, denominator_idx) {
        (Some(numerator_idx), Some(denominator_idx)) => {
            // remove the larger index first, so that the smaller index is still valid
            let (numerator, denominator) = if numerator_idx > denominator_idx {
                let numerator = factors.remove(numerator_idx);
                (numerator, factors.remove(denominator_idx))
            } else {
                let denominator = factors.remove(denominator_idx);
                (factors.remove(numerator_idx), denominator)
            };
            Some((numerator.into_integer()?, denominator.into_integer_recip()?))
        },
        (Some(numerator_idx), None) if denominator_optional => {
            Some((factors.remove(numerator_idx).into_integer()?, int(1)))
        },
        _ => None,
    }
}

/// Extracts the numeric part of the factors of a [`SymExpr::Mul`]: a [`Primary::Float`], or an
/// integer numerator and / or an integer denominator. The extracted factors are removed and
/// returned as a single expression.
pub(crate) fn extract_fractional(factors: &mut Vec<SymExpr>) -> Option<SymExpr> {
    if let Some(idx) = factors.iter().position(SymExpr::is_float) {
        return Some(factors.remove(idx));
    }

    let numerator_idx = factors.iter().position(SymExpr::is_integer);
    let denominator_idx = factors.iter().position(SymExpr::is_integer_recip);

    match (numerator_idx, denominator_idx) {
        (Some(numerator_idx), Some(denominator_idx)) => {
            if numerator_idx > denominator_idx {
                let numerator = factors.remove(numerator_idx);
                Some(numerator * factors.remove(denominator_idx))
            } else {
                let denominator = factors.remove(denominator_idx);
                Some(factors.remove(numerator_idx) * denominator)
            }
        },
        (Some(idx), None) | (None, Some(idx)) => Some(factors.remove(idx)),
        (None, None) => None,
    }
}

/// Interprets a purely numerical expression as an exact fraction.
///
/// - `int` -> `int / 1`
/// - `int^-1` -> `1 / int`
/// - `a * b^-1` -> `a / b`
pub(crate) fn as_integer_fraction(expr: &SymExpr) -> Option<(Integer, Integer)> {
    match expr {
        SymExpr::Primary(Primary::Integer(num)) => Some((num.clone(), int(1))),
        SymExpr::Exp(..) => expr.as_integer_recip().map(|den| (int(1), den.clone())),
        SymExpr::Mul(factors) => {
            let mut factors = factors.clone();
            let fraction = extract_integer_fraction(&mut factors, true)?;
            factors.is_empty().then_some(fraction)
        },
        _ => None,
    }
}

/// Evaluates a purely numerical expression (a float, or an exact fraction) as a [`Float`].
pub(crate) fn as_float(expr: &SymExpr) -> Option<Float> {
    if let Some(value) = expr.as_float() {
        return Some(value.clone());
    }

    let (numerator, denominator) = as_integer_fraction(expr)?;
    if denominator == 0 {
        return None;
    }
    Some(float(&numerator) / float(&denominator))
}
