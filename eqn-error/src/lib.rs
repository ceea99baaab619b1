//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` resolve `eqn_error::EXPR` in this crate's own tests
#[cfg(test)]
extern crate self as eqn_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display}, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// The one-line message of this error, without any source highlighting.
    fn message(&self) -> String;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to the given writer, highlighting `input`.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, out: W) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), out)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use eqn_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("cannot divide by `{}`", factor),
        labels = ["this factor", "this side"],
        help = "pick a non-zero factor",
    )]
    struct BadFactor {
        factor: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see here", labels = ["here"])]
    struct Plain;

    fn render(err: &Error, input: &str) -> String {
        let mut out = Vec::new();
        err.write_report("input", input, &mut out).unwrap();
        String::from_utf8(strip_ansi_escapes::strip(out)).unwrap()
    }

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![10..11], BadFactor { factor: "0".to_string() });
        assert_eq!(err.to_string(), "cannot divide by `0`");
    }

    #[test]
    fn report_contains_labels_and_help() {
        let input = "divide by 0 on left";
        let err = Error::new(vec![10..11, 12..19], BadFactor { factor: "0".to_string() });
        let report = render(&err, input);
        assert!(report.contains("cannot divide by `0`"));
        assert!(report.contains("this factor"));
        assert!(report.contains("this side"));
        assert!(report.contains("pick a non-zero factor"));
    }

    #[test]
    fn unit_struct_report() {
        let err = Error::new(vec![0..4], Plain);
        assert_eq!(err.to_string(), "nothing to see here");
        assert!(render(&err, "oops").contains("here"));
    }
}
