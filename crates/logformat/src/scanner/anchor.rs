use std::ops::Range;

use crate::error::ErrorKind;
use crate::ir::Span;

/// Offsets noted while scanning one literal, escape or directive, from which
/// an error's span is computed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Anchors {
    /// The `%`, the `\` or the literal byte.
    pub start: usize,
    /// End of the bytes implicated so far.
    pub cursor: usize,
    /// The opening `{`.
    pub brace: Option<usize>,
    /// Between the braces.
    pub name: Option<Range<usize>>,
    /// The most recent status-code digits.
    pub digits: Option<Range<usize>>,
    /// The first `<`/`>`.
    pub marker: Option<usize>,
}

impl Anchors {
    pub fn at(start: usize) -> Self {
        Self {
            start,
            cursor: start,
            ..Self::default()
        }
    }

    /// Which bytes to blame for `kind`.
    ///
    /// Anchors that were never recorded fall back to the whole construct,
    /// from `start` to `cursor`.
    pub fn locate(&self, kind: ErrorKind) -> Span {
        let whole = Span::new(self.start, self.cursor);
        let name = || self.name.clone().map_or(whole, Span::from);

        match kind {
            ErrorKind::MissingClosingBrace => self.brace.map_or(whole, |b| Span::new(b, b + 1)),
            ErrorKind::EmptyName => self.brace.map_or(whole, |b| Span::new(b, b + 2)),

            ErrorKind::NameOverflow
            | ErrorKind::UnrecognisedIpType
            | ErrorKind::UnrecognisedRtimeUnit
            | ErrorKind::UnrecognisedPortType
            | ErrorKind::UnrecognisedIdType => name(),

            ErrorKind::StatusOverflow => self.digits.clone().map_or(whole, Span::from),
            ErrorKind::TooManyStatuses => {
                let end = self.digits.as_ref().map_or(self.cursor, |d| d.end);
                Span::new(self.start, end)
            }

            ErrorKind::TooManyRedirectFlags => self.marker.map_or(whole, |m| Span::new(m, m + 2)),

            ErrorKind::MissingDirective
            | ErrorKind::MissingName
            | ErrorKind::UnwantedName
            | ErrorKind::UnrecognisedDirective
            | ErrorKind::MissingEscape
            | ErrorKind::UnrecognisedEscape
            | ErrorKind::Hook => whole,
        }
    }
}
