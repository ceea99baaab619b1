//! Conversion of a [`SymExpr`] back into a displayable AST.
//!
//! The flattened form has no inherent order, so terms and factors are arranged canonically:
//! terms by descending degree (constants last), factors with the numeric coefficient first.
//! Negative terms are written with subtraction, and factors with negative integer exponents are
//! moved into a denominator.

use crate::primitive::fmt_float;
use eqn_parser::parser::ast::{
    Binary,
    Call,
    Expr as AstExpr,
    LitFloat,
    LitInt,
    LitSym,
    Literal,
    Unary,
};
use eqn_parser::parser::token::op::BinOpKind;
use rug::Integer;
use std::cmp::Reverse;
use super::{Primary, SymExpr};

/// Converts the expression into an AST.
pub(crate) fn to_ast(expr: &SymExpr) -> AstExpr {
    match expr {
        SymExpr::Primary(primary) => primary_to_ast(primary),
        SymExpr::Add(terms) => sum_to_ast(terms),
        SymExpr::Mul(factors) => product_to_ast(factors),
        SymExpr::Exp(base, exp) => power_to_ast(base, exp),
    }
}

fn int_literal(value: &Integer) -> AstExpr {
    AstExpr::Literal(Literal::Integer(LitInt { value: value.to_string(), span: 0..0 }))
}

fn primary_to_ast(primary: &Primary) -> AstExpr {
    match primary {
        Primary::Integer(int) if *int < 0 => {
            AstExpr::Unary(Unary::negate(int_literal(&Integer::from(-int))))
        },
        Primary::Integer(int) => int_literal(int),
        Primary::Float(float) if float.is_sign_negative() && !float.is_zero() => {
            let literal = AstExpr::Literal(Literal::Float(LitFloat {
                value: fmt_float(&float.clone().abs()),
                span: 0..0,
            }));
            AstExpr::Unary(Unary::negate(literal))
        },
        Primary::Float(float) => AstExpr::Literal(Literal::Float(LitFloat {
            value: fmt_float(float),
            span: 0..0,
        })),
        Primary::Symbol(sym) => AstExpr::Literal(Literal::Symbol(LitSym {
            name: sym.clone(),
            span: 0..0,
        })),
        Primary::Call(name, args) => AstExpr::Call(Call {
            name: LitSym { name: name.clone(), span: 0..0 },
            args: args.iter().map(to_ast).collect(),
            span: 0..0,
            paren_span: 0..0,
        }),
    }
}

/// If the expression reads as negative (a negative number, or a product with a negative
/// coefficient), returns the expression with the sign removed.
fn strip_sign(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Integer(int)) if *int < 0 => {
            Some(SymExpr::Primary(Primary::Integer(Integer::from(-int))))
        },
        SymExpr::Primary(Primary::Float(float)) if float.is_sign_negative() && !float.is_zero() => {
            Some(SymExpr::Primary(Primary::Float(float.clone().abs())))
        },
        SymExpr::Mul(factors) => {
            let idx = factors.iter().position(|factor| strip_sign(factor).is_some())?;
            let mut factors = factors.clone();
            let positive = strip_sign(&factors[idx])?;
            if positive.is_integer_eq(1) {
                factors.remove(idx);
            } else {
                factors[idx] = positive;
            }
            Some(SymExpr::Mul(factors).downgrade())
        },
        _ => None,
    }
}

/// Returns the degree of a term: the sum of the integer exponents of its symbolic factors.
fn degree(expr: &SymExpr) -> i64 {
    match expr {
        SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) => 0,
        SymExpr::Primary(Primary::Symbol(_) | Primary::Call(..)) => 1,
        SymExpr::Add(terms) => terms.iter().map(degree).max().unwrap_or(0),
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        SymExpr::Exp(base, exp) => {
            let exp = exp.as_integer().and_then(|n| n.to_i64()).unwrap_or(1);
            exp.saturating_mul(degree(base))
        },
    }
}

fn sum_to_ast(terms: &[SymExpr]) -> AstExpr {
    let mut terms = terms.iter()
        .map(|term| match strip_sign(term) {
            Some(positive) => (true, positive),
            None => (false, term.clone()),
        })
        .collect::<Vec<_>>();
    terms.sort_by_cached_key(|(negative, term)| {
        (Reverse(degree(term)), to_ast(term).to_string(), *negative)
    });

    let mut iter = terms.into_iter();
    let Some((negative, first)) = iter.next() else {
        return int_literal(&Integer::new());
    };

    let mut expr = if negative {
        to_ast(&(-first))
    } else {
        to_ast(&first)
    };
    for (negative, term) in iter {
        let op = if negative { BinOpKind::Sub } else { BinOpKind::Add };
        expr = AstExpr::Binary(Binary::synthetic(expr, op, to_ast(&term)));
    }
    expr
}

/// Returns true if the factor is written starting with a name, so that a numeric coefficient
/// can be juxtaposed with it, as in `3x` or `2x^2`.
fn starts_with_name(factor: &SymExpr) -> bool {
    match factor {
        SymExpr::Primary(Primary::Symbol(_) | Primary::Call(..)) => true,
        SymExpr::Exp(base, _) => matches!(**base, SymExpr::Primary(Primary::Symbol(_) | Primary::Call(..))),
        _ => false,
    }
}

/// Multiplies the given factors together with explicit `*` operators.
fn join_factors(factors: &[SymExpr]) -> Option<AstExpr> {
    factors.iter()
        .map(to_ast)
        .reduce(|lhs, rhs| AstExpr::Binary(Binary::synthetic(lhs, BinOpKind::Mul, rhs)))
}

fn product_to_ast(factors: &[SymExpr]) -> AstExpr {
    let mut coefficient = None;
    let mut numerator = Vec::new();
    let mut denominator = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Integer(_) | Primary::Float(_)) if coefficient.is_none() => {
                coefficient = Some(factor.clone());
            },
            SymExpr::Exp(base, exp) if exp.as_integer().map_or(false, |n| *n < 0) => {
                if exp.is_integer_eq(-1) {
                    denominator.push((**base).clone());
                } else {
                    denominator.push(SymExpr::Exp(base.clone(), Box::new(-(**exp).clone())));
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    numerator.sort_by_cached_key(|factor| to_ast(factor).to_string());
    denominator.sort_by_cached_key(|factor| to_ast(factor).to_string());

    // a coefficient of -1 is written as the sign of the first factor
    let negate_first = coefficient.as_ref().map_or(false, |c| c.is_integer_eq(-1))
        && !numerator.is_empty();
    let coefficient = coefficient.filter(|c| {
        numerator.is_empty() || !(c.is_integer_eq(1) || c.is_integer_eq(-1))
    });

    let mut factors = numerator.iter();
    let mut expr = match coefficient {
        Some(coefficient) => Some(to_ast(&coefficient)),
        None => factors.next().map(|first| {
            if negate_first {
                AstExpr::Unary(Unary::negate(to_ast(first)))
            } else {
                to_ast(first)
            }
        }),
    };
    for (idx, factor) in factors.enumerate() {
        let rhs = to_ast(factor);
        expr = Some(match expr {
            Some(lhs) => {
                let juxtapose = idx == 0 && lhs_is_coefficient(&lhs) && starts_with_name(factor);
                let mut binary = Binary::synthetic(lhs, BinOpKind::Mul, rhs);
                binary.op.implicit = juxtapose;
                AstExpr::Binary(binary)
            },
            None => rhs,
        });
    }

    let numerator = expr.unwrap_or_else(|| int_literal(&Integer::from(1)));
    match join_factors(&denominator) {
        Some(denominator) => {
            AstExpr::Binary(Binary::synthetic(numerator, BinOpKind::Div, denominator))
        },
        None => numerator,
    }
}

/// Returns true if the AST is a (possibly negated) number.
fn lhs_is_coefficient(expr: &AstExpr) -> bool {
    match expr {
        AstExpr::Unary(unary) => unary.operand.is_number(),
        expr => expr.is_number(),
    }
}

fn power_to_ast(base: &SymExpr, exp: &SymExpr) -> AstExpr {
    if exp.as_integer().map_or(false, |n| *n < 0) {
        return product_to_ast(&[SymExpr::Exp(Box::new(base.clone()), Box::new(exp.clone()))]);
    }

    AstExpr::Binary(Binary::synthetic(to_ast(base), BinOpKind::Exp, to_ast(exp)))
}

#[cfg(test)]
mod tests {
    use eqn_parser::parser::{ast::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses the expression, converts it to the flattened form and back to text.
    fn round_trip(input: &str) -> String {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        to_ast(&SymExpr::from(expr)).to_string()
    }

    #[test]
    fn terms_by_descending_degree() {
        assert_eq!(round_trip("6 + 5x + x^2"), "x^2 + 5x + 6");
    }

    #[test]
    fn negative_terms_use_subtraction() {
        assert_eq!(round_trip("x - 2"), "x - 2");
        assert_eq!(round_trip("-2 + x"), "x - 2");
        assert_eq!(round_trip("y - 3x"), "-3x + y");
    }

    #[test]
    fn coefficient_is_juxtaposed() {
        assert_eq!(round_trip("x^2*3"), "3x^2");
        assert_eq!(round_trip("y*x*2"), "2x*y");
    }

    #[test]
    fn negative_exponents_become_denominators() {
        assert_eq!(round_trip("x/2"), "x/2");
        assert_eq!(round_trip("3/(2y)"), "3/(2y)");
        assert_eq!(round_trip("x^-2"), "1/x^2");
    }

    #[test]
    fn negation() {
        assert_eq!(round_trip("-x"), "-x");
        assert_eq!(round_trip("-(x + 1)"), "-(x + 1)");
        assert_eq!(round_trip("(-2)^x"), "(-2)^x");
    }
}
