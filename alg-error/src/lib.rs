//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the source regions it came from.

#[cfg(test)]
extern crate self as alg_error;

use ariadne::{Color, Report};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as [`Any`], so that callers can recover the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// Returns the one-line message describing this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from. This may be empty if the
    /// error is not associated with any source code, such as an error raised while evaluating a
    /// tree built by a rewrite rule.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns true if the kind of this error is `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<T>()
    }

    /// Returns the kind of this error as `T`, if it is one.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
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
    use alg_attrs::ErrorKind;
    use ariadne::Source;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("`{}` went wrong", self.what),
        labels = ["right here"],
        help = "try something else",
    )]
    struct Broken {
        what: &'static str,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "nothing to see", labels = [""])]
    struct Quiet;

    fn render(err: &Error, src: &str) -> String {
        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(src)), &mut buf)
            .unwrap();
        String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
    }

    #[test]
    fn downcast_kind() {
        let err = Error::new(vec![0..1], Broken { what: "x" });
        assert!(err.is::<Broken>());
        assert!(!err.is::<Quiet>());
        assert_eq!(err.downcast_ref::<Broken>().unwrap().what, "x");
        assert_eq!(err.to_string(), "`x` went wrong");
    }

    #[test]
    fn report_contains_message_and_help() {
        let err = Error::new(vec![2..3], Broken { what: "y" });
        let out = render(&err, "4 + $");
        assert!(out.contains("`y` went wrong"));
        assert!(out.contains("right here"));
        assert!(out.contains("try something else"));
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(Vec::new(), Quiet);
        let out = render(&err, "x");
        assert!(out.contains("nothing to see"));
    }
}
