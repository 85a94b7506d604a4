//! # logformat
//!
//! Interpreter for Apache `LogFormat` directive strings such as
//! `%h %l %u %t "%r" %>s %b`.
//!
//! ## Overview
//!
//! This crate does not write log lines. It reads a format string once, left
//! to right, and for every literal byte or `%` directive makes exactly one
//! call into a caller-supplied [`Sink`]. What each field means (looking up a
//! header, formatting a timestamp, writing to a file) is entirely the sink's
//! business.
//!
//! The grammar of one directive is:
//!
//! ```text
//! %  [!]status[,status...]  [<|>]  [{argument}]  letter
//! ```
//!
//! - **Status predicate**: `%400,501s` only applies to those statuses, `%!200s`
//!   to all others. Codes are delivered sorted and deduplicated in a [`Predicate`].
//! - **Redirect**: `<` or `>` selects the original or final request. Without
//!   one, `%s %U %T %D %r` default to [`Redirect::Original`] and everything
//!   else to [`Redirect::Final`].
//! - **Argument**: `%{Referer}i`, `%{c}a`, `%{end:msec}t`, ...
//!
//! Parsing stops at the first problem. The returned [`Error`] names an
//! [`ErrorKind`] and a byte [`Span`] of the format string, so a caller can
//! underline exactly what is wrong.
//!
//! ## Examples
//!
//! ### Recording calls
//!
//! ```
//! use logformat::{Field, Options, Recorder};
//!
//! let mut recorder = Recorder::new();
//! logformat::parse("%{X-Test}i", &mut recorder, &Options::default())?;
//!
//! assert_eq!(
//!     recorder.events()[0].field,
//!     Field::ReqHeader { name: "X-Test".into() }
//! );
//! # Ok::<(), logformat::Error>(())
//! ```
//!
//! ### Reporting errors
//!
//! ```
//! use logformat::{ErrorKind, Options, Recorder};
//!
//! let format = "%h %Z";
//! let err = logformat::parse(format, &mut Recorder::new(), &Options::default())
//!     .unwrap_err();
//!
//! assert_eq!(err.kind, ErrorKind::UnrecognisedDirective);
//! assert_eq!(err.snippet(format), "%Z");
//! ```
//!
//! ### Reusing a scratch buffer
//!
//! Arguments passed to sinks are staged in a bounded [`Scratch`] buffer. Its
//! capacity is the longest argument accepted:
//!
//! ```
//! use logformat::{ErrorKind, Options, Recorder, Scratch};
//!
//! let mut scratch = Scratch::with_capacity(8);
//! let options = Options::default();
//!
//! let ok = logformat::parse_with_scratch("%{Referer}i", &mut Recorder::new(), &options, &mut scratch);
//! assert!(ok.is_ok());
//!
//! let err = logformat::parse_with_scratch("%{User-agent}i", &mut Recorder::new(), &options, &mut scratch)
//!     .unwrap_err();
//! assert_eq!(err.kind, ErrorKind::NameOverflow);
//! ```

/// Error kinds and spans.
pub mod error;
/// Well-known formats.
pub mod formats;
/// Vocabulary types handed to sinks.
pub mod ir;
/// Directive scanner.
mod scanner;
/// The sink capability and a recording implementation.
pub mod sink;


pub use error::{Error, ErrorKind};
pub use ir::{
    DEFAULT_TIME_FORMAT, IdKind, IpKind, MAX_STATUS, MAX_STATUSES, Options, PortKind, Predicate,
    Redirect, RtimeUnit, Span, When,
};
pub use scanner::{CapacityExceeded, DEFAULT_SCRATCH_CAPACITY, Scratch};
pub use sink::{Declined, Event, Field, HookResult, Recorder, Sink};

use scanner::Scanner;

/// Interprets `format`, calling `sink` once per literal byte or directive.
///
/// Uses a fresh [`Scratch`] of [`DEFAULT_SCRATCH_CAPACITY`]; see
/// [`parse_with_scratch`] to supply one.
///
/// # Errors
///
/// The first malformed construct, or the first sink that declines, ends the
/// parse. Sink calls made before that point have already happened.
pub fn parse<S: Sink + ?Sized>(format: &str, sink: &mut S, options: &Options) -> Result<(), Error> {
    let mut scratch = Scratch::default();
    parse_with_scratch(format, sink, options, &mut scratch)
}

/// Like [`parse`], staging arguments in the caller's `scratch`.
///
/// Parses share no state, so separate threads may parse concurrently as
/// long as each uses its own `scratch`.
///
/// # Errors
///
/// See [`parse`]. Arguments longer than `scratch.capacity()` fail with
/// [`ErrorKind::NameOverflow`].
pub fn parse_with_scratch<S: Sink + ?Sized>(
    format: &str,
    sink: &mut S,
    options: &Options,
    scratch: &mut Scratch,
) -> Result<(), Error> {
    Scanner::new(format, sink, options, scratch).run()
}
