//! Single-pass interpreter for LogFormat strings.
//!
//! The driver in this module walks the input once, left to right. Literal
//! bytes and escapes go straight to [`Sink::literal`]; a `%` hands over to
//! the directive grammar, whose parts live in the sibling modules and run in
//! this fixed order:
//!
//! ```text
//! %  [!]status[,status...]  [<|>]  [{argument}]  letter
//!    predicate.rs           redirect.rs  argument.rs  dispatch.rs
//! ```
//!
//! Every failure is reported through [`Scanner::fail`], which turns the
//! offsets gathered in [`Anchors`] into the span of the returned [`Error`].

mod anchor;
mod argument;
mod dispatch;
mod predicate;
mod redirect;

pub use argument::{CapacityExceeded, DEFAULT_SCRATCH_CAPACITY, Scratch};

use anchor::Anchors;

use crate::error::{Error, ErrorKind};
use crate::ir::{Options, Redirect};
use crate::sink::{HookResult, Sink};

pub(crate) struct Scanner<'a, S: Sink + ?Sized> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    sink: &'a mut S,
    options: &'a Options,
    scratch: &'a mut Scratch,
    anchors: Anchors,
}

impl<'a, S: Sink + ?Sized> Scanner<'a, S> {
    /// The format ends at the end of `input` or at its first NUL, whichever is first.
    pub fn new(
        input: &'a str,
        sink: &'a mut S,
        options: &'a Options,
        scratch: &'a mut Scratch,
    ) -> Self {
        let input = input.split('\0').next().unwrap_or_default();
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            sink,
            options,
            scratch,
            anchors: Anchors::default(),
        }
    }

    pub fn run(mut self) -> Result<(), Error> {
        log::trace!("scanning log format of {} bytes", self.bytes.len());

        while let Some(byte) = self.peek() {
            self.anchors = Anchors::at(self.pos);
            match byte {
                b'\\' => self.escape()?,
                b'%' => self.directive()?,
                _ => {
                    self.literal_anchors();
                    self.pos += 1;
                    let result = self.sink.literal(byte);
                    self.hook(result)?;
                }
            }
        }

        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Byte length of the character at `pos`, zero at the end of input.
    fn width_at(&self, pos: usize) -> usize {
        self.input
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8)
    }

    /// Anchors a literal byte to the whole character it belongs to.
    fn literal_anchors(&mut self) {
        let mut start = self.pos;
        while !self.input.is_char_boundary(start) {
            start -= 1;
        }
        self.anchors.start = start;
        self.anchors.cursor = start + self.width_at(start);
    }

    fn fail(&self, kind: ErrorKind) -> Error {
        let span = self.anchors.locate(kind);
        log::debug!(
            "rejecting log format: {} at {}..{}",
            kind,
            span.start,
            span.end
        );
        Error::new(kind, span)
    }

    fn hook(&self, result: HookResult) -> Result<(), Error> {
        result.map_err(|_| self.fail(ErrorKind::Hook))
    }

    /// `\t`, `\n`, `\'`, `\"` and `\\`.
    fn escape(&mut self) -> Result<(), Error> {
        self.pos += 1;
        self.anchors.cursor = self.pos;

        let Some(next) = self.peek() else {
            return Err(self.fail(ErrorKind::MissingEscape));
        };

        self.anchors.cursor = self.pos + self.width_at(self.pos);
        let byte = match next {
            b't' => b'\t',
            b'n' => b'\n',
            b'\'' => b'\'',
            b'"' => b'"',
            b'\\' => b'\\',
            _ => return Err(self.fail(ErrorKind::UnrecognisedEscape)),
        };
        self.pos += 1;

        let result = self.sink.literal(byte);
        self.hook(result)
    }

    fn directive(&mut self) -> Result<(), Error> {
        self.pos += 1;
        self.anchors.cursor = self.pos;

        let predicate = self.predicate()?;
        let marker = self.redirect_marker()?;
        let argument = self.argument()?;
        self.anchors.cursor = self.pos;

        let Some(letter) = self.peek() else {
            return Err(self.fail(ErrorKind::MissingDirective));
        };
        let redirect = marker.unwrap_or_else(|| Redirect::default_for(letter));

        self.dispatch(&predicate, redirect, argument)
    }
}
