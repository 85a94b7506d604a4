use std::fmt;
use std::ops::Range;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Upper bound on the number of status codes a single directive may list.
pub const MAX_STATUSES: usize = 128;

/// Largest value accepted for an individual status code.
pub const MAX_STATUS: u32 = 0xffff;

/// Pattern handed to [`Sink::time`](crate::Sink::time) for a bare `%t`.
pub const DEFAULT_TIME_FORMAT: &str = "[%d/%b/%Y:%T %z]";

/// Half-open byte range into the format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Covers `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when `start` is not before `end`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The span as a range, for slicing the format string.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Status-code filter attached to a directive, e.g. the `!200,304` in `%!200,304s`.
///
/// The list is kept sorted and free of duplicates. An empty, non-negated
/// predicate means the directive is unconditional.
#[derive(Clone)]
pub struct Predicate {
    negated: bool,
    len: usize,
    statuses: [u32; MAX_STATUSES],
}

/// Returned by [`Predicate::push`] once [`MAX_STATUSES`] codes are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PredicateFull;

impl Default for Predicate {
    fn default() -> Self {
        Self::new()
    }
}

impl Predicate {
    pub fn new() -> Self {
        Self {
            negated: false,
            len: 0,
            statuses: [0; MAX_STATUSES],
        }
    }

    /// Whether the list was introduced with `!`.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Status codes in ascending order, without duplicates.
    pub fn statuses(&self) -> &[u32] {
        &self.statuses[..self.len]
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decides whether a response with `status` should produce output.
    ///
    /// With no listed codes every status matches, negated or not.
    pub fn matches(&self, status: u32) -> bool {
        if self.is_empty() {
            return true;
        }
        self.statuses().binary_search(&status).is_ok() != self.negated
    }

    pub(crate) fn negate(&mut self) {
        self.negated = true;
    }

    pub(crate) fn push(&mut self, status: u32) -> Result<(), PredicateFull> {
        if self.len == MAX_STATUSES {
            return Err(PredicateFull);
        }
        self.statuses[self.len] = status;
        self.len += 1;
        Ok(())
    }

    /// Sorts the collected codes and drops repeats.
    pub(crate) fn normalize(&mut self) {
        let statuses = &mut self.statuses[..self.len];
        statuses.sort_unstable();

        let mut kept = 0;
        for i in 0..statuses.len() {
            if kept > 0 && statuses[kept - 1] == statuses[i] {
                continue;
            }
            statuses[kept] = statuses[i];
            kept += 1;
        }
        statuses[kept..].fill(0);
        self.len = kept;
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.negated == other.negated && self.statuses() == other.statuses()
    }
}

impl Eq for Predicate {}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("negated", &self.negated)
            .field("statuses", &self.statuses())
            .finish()
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Predicate", 2)?;
        state.serialize_field("negated", &self.negated)?;
        state.serialize_field("statuses", self.statuses())?;
        state.end()
    }
}

/// Whether a directive looks at the original request or the final one
/// reached after internal redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Redirect {
    /// `<`
    Original,
    /// `>`
    Final,
}

impl Redirect {
    pub(crate) fn from_marker(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Self::Original),
            b'>' => Some(Self::Final),
            _ => None,
        }
    }

    /// `%s`, `%U`, `%T`, `%D` and `%r` look at the original request,
    /// everything else at the final one.
    pub fn default_for(directive: u8) -> Self {
        match directive {
            b's' | b'U' | b'T' | b'D' | b'r' => Self::Original,
            _ => Self::Final,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpKind {
    /// `%a`
    Client,
    /// `%{c}a`
    Peer,
    /// `%A`
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    Canonical,
    Local,
    Remote,
}

impl PortKind {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "canonical" => Some(Self::Canonical),
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    Pid,
    Tid,
    Hextid,
}

impl IdKind {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "pid" => Some(Self::Pid),
            "tid" => Some(Self::Tid),
            "hextid" => Some(Self::Hextid),
            _ => None,
        }
    }
}

/// Time unit for `%T`, `%D` and the numeric `%{...}t` tokens.
///
/// The `*Frac` variants only reach [`Sink::time_frac`](crate::Sink::time_frac);
/// [`Sink::time_taken`](crate::Sink::time_taken) never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RtimeUnit {
    MsFrac,
    UsFrac,
    Ms,
    Us,
    S,
}

impl RtimeUnit {
    /// Units accepted in `%{UNIT}T`.
    pub(crate) fn from_taken_name(name: &str) -> Option<Self> {
        match name {
            "ms" => Some(Self::Ms),
            "us" => Some(Self::Us),
            "s" => Some(Self::S),
            _ => None,
        }
    }

    /// Tokens accepted in `%{...}t` after the optional `begin:`/`end:` prefix.
    pub(crate) fn from_time_token(token: &str) -> Option<Self> {
        match token {
            "sec" => Some(Self::S),
            "msec" => Some(Self::Ms),
            "usec" => Some(Self::Us),
            "msec_frac" => Some(Self::MsFrac),
            "usec_frac" => Some(Self::UsFrac),
            _ => None,
        }
    }
}

/// When the timestamp for `%t` is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    /// Start of request processing.
    #[default]
    Begin,
    /// When the log entry is written.
    End,
}

impl When {
    /// Strips a leading `begin:` or `end:` from a `%{...}t` argument.
    pub(crate) fn split(format: &str) -> (Self, &str) {
        if let Some(rest) = format.strip_prefix("begin:") {
            (Self::Begin, rest)
        } else if let Some(rest) = format.strip_prefix("end:") {
            (Self::End, rest)
        } else {
            (Self::Begin, format)
        }
    }
}

/// Server settings forwarded verbatim to the sinks that depend on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Passed to [`Sink::keepalive_reqs`](crate::Sink::keepalive_reqs).
    pub keep_alive: bool,
    /// Passed to [`Sink::remote_hostname`](crate::Sink::remote_hostname).
    pub hostname_lookups: bool,
    /// Passed to [`Sink::remote_logname`](crate::Sink::remote_logname).
    pub identity_check: bool,
    /// Passed to [`Sink::server_name`](crate::Sink::server_name) for `%V`.
    pub use_canonical_name: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(negated: bool, statuses: &[u32]) -> Predicate {
        let mut p = Predicate::new();
        if negated {
            p.negate();
        }
        for &s in statuses {
            p.push(s).unwrap();
        }
        p.normalize();
        p
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let p = predicate(false, &[404, 200, 200, 500, 404]);
        assert_eq!(p.statuses(), &[200, 404, 500]);
    }

    #[test]
    fn test_equality_ignores_storage_past_len() {
        assert_eq!(predicate(false, &[404, 200, 200]), predicate(false, &[200, 404]));
        assert_ne!(predicate(true, &[200, 404]), predicate(false, &[200, 404]));
        assert_ne!(predicate(false, &[200]), predicate(false, &[200, 404]));
    }

    #[test]
    fn test_push_rejects_past_capacity() {
        let mut p = Predicate::new();
        for s in 0..MAX_STATUSES as u32 {
            p.push(s).unwrap();
        }
        assert_eq!(p.push(1), Err(PredicateFull));
    }

    #[test]
    fn test_matches() {
        assert!(Predicate::new().matches(500));
        assert!(predicate(true, &[]).matches(500));

        let only = predicate(false, &[200, 304]);
        assert!(only.matches(304));
        assert!(!only.matches(404));

        let except = predicate(true, &[200, 304]);
        assert!(!except.matches(200));
        assert!(except.matches(404));
    }

    #[test]
    fn test_when_split() {
        assert_eq!(When::split("end:usec"), (When::End, "usec"));
        assert_eq!(When::split("begin:%Y"), (When::Begin, "%Y"));
        assert_eq!(When::split("%H:%M"), (When::Begin, "%H:%M"));
    }
}
