//! Functions to construct [`Integer`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer};

/// The number of bits of precision to use for floating-point values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates an [`Integer`] from a string slice of decimal digits.
///
/// Integer literals come from the tokenizer, which only accepts ASCII digits, so the fallback
/// value is never observed in practice.
pub fn int_from_str(s: &str) -> Integer {
    Integer::from_str_radix(s, 10).unwrap_or_default()
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Float`] from a string slice, such as `3.14` or `.5`.
pub fn float_from_str(s: &str) -> Float {
    match Float::parse(s) {
        Ok(parsed) => Float::with_val(PRECISION, parsed),
        Err(_) => float(0),
    }
}

/// Formats a [`Float`] the way a person would write it: no exponent, no trailing zeros.
pub fn fmt_float(f: &Float) -> String {
    let value = f.to_f64();
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literals() {
        assert_eq!(int_from_str("144"), 144);
        assert_eq!(float_from_str(".5").to_f64(), 0.5);
        assert_eq!(float_from_str("3.25").to_f64(), 3.25);
    }

    #[test]
    fn format_floats() {
        assert_eq!(fmt_float(&float(0.5)), "0.5");
        assert_eq!(fmt_float(&float(2)), "2.0");
        assert_eq!(fmt_float(&float(-1.25)), "-1.25");
    }
}
