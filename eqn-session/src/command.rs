use crate::side::Side;

/// The canonical operation named by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Set,
    Simplify,
    Divide,
    Multiply,
    Add,
    Subtract,
    Unrecognized,
}

/// How the argument of a verb is cut out of the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Argument {
    /// The verb takes no argument.
    None,

    /// Everything after the alias and one separator, minus one trailing character (`set x=1;`).
    Enclosed,

    /// Everything after the alias and one separator.
    Rest,
}

struct VerbEntry {
    verb: Verb,

    /// Aliases, longest first.
    aliases: &'static [&'static str],
    argument: Argument,
}

const VERBS: &[VerbEntry] = &[
    VerbEntry { verb: Verb::Set, aliases: &["set"], argument: Argument::Enclosed },
    VerbEntry { verb: Verb::Simplify, aliases: &["simplify"], argument: Argument::None },
    VerbEntry { verb: Verb::Divide, aliases: &["divide by", "divide"], argument: Argument::Rest },
    VerbEntry { verb: Verb::Multiply, aliases: &["multiply by", "multiply"], argument: Argument::Rest },
    VerbEntry { verb: Verb::Add, aliases: &["add"], argument: Argument::Rest },
    VerbEntry { verb: Verb::Subtract, aliases: &["subtract"], argument: Argument::Rest },
];

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub verb: Verb,

    /// The raw argument text. It is not validated until the operation is applied.
    pub argument: Option<String>,
    pub side: Side,
}

impl Operation {
    pub fn new(verb: Verb, argument: Option<String>, side: Side) -> Self {
        Self { verb, argument, side }
    }
}

/// Returns the characters of `text` in `start..end`, clamped to its length.
fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().take(end).skip(start).collect()
}

/// Matches the command text against the verb table.
///
/// Aliases are matched as prefixes of `text`, longest first, so `divide by 2` yields the
/// argument `2` rather than `by 2`. Text matching no alias produces [`Verb::Unrecognized`].
pub fn parse_command(text: &str, side: Side) -> Operation {
    let matched = VERBS.iter()
        .flat_map(|entry| entry.aliases.iter().map(move |alias| (entry, *alias)))
        .filter(|(_, alias)| text.starts_with(*alias))
        .max_by_key(|(_, alias)| alias.len());

    let Some((entry, alias)) = matched else {
        return Operation::new(Verb::Unrecognized, None, side);
    };

    let start = alias.chars().count() + 1;
    let len = text.chars().count();
    let argument = match entry.argument {
        Argument::None => None,
        Argument::Enclosed => Some(char_slice(text, start, len.saturating_sub(1))),
        Argument::Rest => Some(char_slice(text, start, len)),
    };

    Operation::new(entry.verb, argument, side)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(text: &str) -> Operation {
        parse_command(text, Side::Both)
    }

    fn op(verb: Verb, argument: Option<&str>) -> Operation {
        Operation::new(verb, argument.map(str::to_string), Side::Both)
    }

    #[test]
    fn set_drops_trailing_character() {
        assert_eq!(parse("set x^2=4;"), op(Verb::Set, Some("x^2=4")));
        assert_eq!(parse("set x = 1)"), op(Verb::Set, Some("x = 1")));
    }

    #[test]
    fn set_without_argument() {
        assert_eq!(parse("set"), op(Verb::Set, Some("")));
        assert_eq!(parse("set;"), op(Verb::Set, Some("")));
    }

    #[test]
    fn simplify_ignores_rest() {
        assert_eq!(parse("simplify"), op(Verb::Simplify, None));
        assert_eq!(parse("simplify it"), op(Verb::Simplify, None));
    }

    #[test]
    fn longest_alias_first() {
        assert_eq!(parse("divide by 2"), op(Verb::Divide, Some("2")));
        assert_eq!(parse("divide 2"), op(Verb::Divide, Some("2")));
        assert_eq!(parse("multiply by x + 1"), op(Verb::Multiply, Some("x + 1")));
        assert_eq!(parse("multiply 3"), op(Verb::Multiply, Some("3")));
    }

    #[test]
    fn add_and_subtract() {
        assert_eq!(parse("add 3"), op(Verb::Add, Some("3")));
        assert_eq!(parse("subtract 2x"), op(Verb::Subtract, Some("2x")));
        assert_eq!(parse("add"), op(Verb::Add, Some("")));
    }

    #[test]
    fn unrecognized() {
        assert_eq!(parse("bogus command"), op(Verb::Unrecognized, None));
        assert_eq!(parse(""), op(Verb::Unrecognized, None));
        assert_eq!(parse(" divide by 2"), op(Verb::Unrecognized, None));
    }

    #[test]
    fn keeps_side() {
        assert_eq!(
            parse_command("divide by 2", Side::Left),
            Operation::new(Verb::Divide, Some("2".to_string()), Side::Left),
        );
    }
}
