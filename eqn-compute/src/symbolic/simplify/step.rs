use std::fmt;

/// A single rewrite applied by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + 0 = a`
    AddZero,

    /// `2a + 3a = 5a`
    CombineLikeTerms,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    MultiplyOne,

    /// `6/4 = 3/2`
    ReduceFraction,

    /// `a^b * a^c = a^(b + c)`
    CombineLikeFactors,

    /// `2 * 0.5 = 1.0`
    FoldNumbers,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`, for positive integer `a`
    ZeroPower,

    /// `2^3 = 8`
    EvaluatePower,

    /// `(a^b)^c = a^(b*c)`, for integer `c`
    PowerOfPower,

    /// `2(a + b) = 2a + 2b`
    DistributiveProperty,

    /// `(a*b)^c = a^c * b^c`, for integer `c`
    DistributePower,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            Self::AddZero => "remove zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::MultiplyZero => "multiply by zero",
            Self::MultiplyOne => "remove factors of one",
            Self::ReduceFraction => "reduce fraction",
            Self::CombineLikeFactors => "combine like factors",
            Self::FoldNumbers => "multiply numbers",
            Self::PowerZero => "power of zero",
            Self::PowerOne => "power of one",
            Self::OnePower => "one raised to a power",
            Self::ZeroPower => "zero raised to a power",
            Self::EvaluatePower => "evaluate power",
            Self::PowerOfPower => "power of a power",
            Self::DistributiveProperty => "distribute coefficient",
            Self::DistributePower => "distribute power over product",
        };
        write!(f, "{}", description)
    }
}
