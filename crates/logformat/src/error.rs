use serde::{Deserialize, Serialize};

use crate::ir::Span;

/// Every way a format string can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("missing closing brace")]
    MissingClosingBrace,
    #[error("missing directive")]
    MissingDirective,
    #[error("missing escape")]
    MissingEscape,
    #[error("missing name")]
    MissingName,

    #[error("unrecognised directive")]
    UnrecognisedDirective,
    #[error("unrecognised escape")]
    UnrecognisedEscape,
    #[error("unrecognised ip type")]
    UnrecognisedIpType,
    #[error("unrecognised rtime unit")]
    UnrecognisedRtimeUnit,
    #[error("unrecognised port type")]
    UnrecognisedPortType,
    #[error("unrecognised id type")]
    UnrecognisedIdType,

    #[error("name overflow")]
    NameOverflow,
    #[error("status overflow")]
    StatusOverflow,
    #[error("too many statuses")]
    TooManyStatuses,
    #[error("too many redirect flags")]
    TooManyRedirectFlags,
    #[error("empty name")]
    EmptyName,
    #[error("unwanted name")]
    UnwantedName,

    /// A sink declined its call.
    #[error("hook error")]
    Hook,
}

/// Why parsing stopped, and which bytes of the format string are to blame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: Span,
}

impl Error {
    /// An error of `kind` covering `span` of the format string.
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The offending part of `format`, for highlighting.
    ///
    /// `format` must be the string that produced this error; an empty
    /// string is returned if the span does not fit it.
    pub fn snippet<'a>(&self, format: &'a str) -> &'a str {
        format.get(self.span.range()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::UnrecognisedDirective, Span::new(3, 5));
        assert_eq!(err.to_string(), "unrecognised directive at 3..5");
    }

    #[test]
    fn test_snippet() {
        let err = Error::new(ErrorKind::EmptyName, Span::new(1, 3));
        assert_eq!(err.snippet("%{}i"), "{}");
        assert_eq!(err.snippet("%"), "");
    }
}
