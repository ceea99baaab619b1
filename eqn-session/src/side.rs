/// Which side(s) of the equation an operation applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,

    /// Both sides, used when the command names no side.
    #[default]
    Both,
}

/// Side suffixes, most specific first so that `left` never shadows `on left`.
const SUFFIXES: [(&str, Side); 4] = [
    ("on left", Side::Left),
    ("left", Side::Left),
    ("on right", Side::Right),
    ("right", Side::Right),
];

/// Detects a trailing side modifier and strips it, along with the one character preceding it.
///
/// ```
/// use eqn_session::side::{extract_side, Side};
///
/// assert_eq!(extract_side("divide by 2 on left"), ("divide by 2", Side::Left));
/// assert_eq!(extract_side("divide by 2"), ("divide by 2", Side::Both));
/// ```
pub fn extract_side(text: &str) -> (&str, Side) {
    for (suffix, side) in SUFFIXES {
        if let Some(rest) = text.strip_suffix(suffix) {
            let mut chars = rest.chars();
            chars.next_back();
            return (chars.as_str(), side);
        }
    }

    (text, Side::Both)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn longest_suffix_wins() {
        assert_eq!(extract_side("divide by 2 on left"), ("divide by 2", Side::Left));
        assert_eq!(extract_side("add 3 on right"), ("add 3", Side::Right));
    }

    #[test]
    fn short_suffix() {
        assert_eq!(extract_side("divide by 2 left"), ("divide by 2", Side::Left));
        assert_eq!(extract_side("subtract x right"), ("subtract x", Side::Right));
    }

    #[test]
    fn no_suffix() {
        assert_eq!(extract_side("simplify"), ("simplify", Side::Both));
        assert_eq!(extract_side(""), ("", Side::Both));
    }

    #[test]
    fn bare_suffix() {
        assert_eq!(extract_side("left"), ("", Side::Left));
        assert_eq!(extract_side("on right"), ("", Side::Right));
    }

    #[test]
    fn multibyte_separator() {
        assert_eq!(extract_side("add 1\u{a0}left"), ("add 1", Side::Left));
    }
}
