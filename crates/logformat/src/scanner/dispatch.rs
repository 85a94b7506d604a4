use std::ops::Range;

use super::Scanner;
use crate::error::{Error, ErrorKind};
use crate::ir::{
    DEFAULT_TIME_FORMAT, IdKind, IpKind, PortKind, Predicate, Redirect, RtimeUnit, When,
};
use crate::sink::Sink;

/// The directive selector, after folding `^ti`/`^to` into single values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    Byte(u8),
    ReqTrailer,
    RespTrailer,
}

/// How a directive treats a `{...}` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Takes {
    Required,
    Optional,
    /// Alphabetic directives that have no use for one.
    Forbidden,
    /// Anything else; the argument is dropped.
    Ignored,
}

impl Letter {
    fn takes(self) -> Takes {
        match self {
            Letter::ReqTrailer | Letter::RespTrailer => Takes::Required,
            Letter::Byte(b'C' | b'e' | b'i' | b'n' | b'o') => Takes::Required,
            Letter::Byte(b'a' | b'p' | b'P' | b'T' | b't') => Takes::Optional,
            Letter::Byte(b) if b.is_ascii_alphabetic() => Takes::Forbidden,
            Letter::Byte(_) => Takes::Ignored,
        }
    }
}

impl<S: Sink + ?Sized> Scanner<'_, S> {
    /// Consumes the directive letter at the cursor and makes the one sink
    /// call it stands for.
    pub(super) fn dispatch(
        &mut self,
        pred: &Predicate,
        redirect: Redirect,
        argument: Option<Range<usize>>,
    ) -> Result<(), Error> {
        let letter = self.letter()?;
        let input = self.input;
        let name = argument.map(|range| &input[range]);

        match (letter.takes(), name) {
            (Takes::Required, None) => return Err(self.fail(ErrorKind::MissingName)),
            (Takes::Required, Some(name)) => self.stage(name)?,
            (Takes::Forbidden, Some(_)) => return Err(self.fail(ErrorKind::UnwantedName)),
            _ => {}
        }

        log::trace!(
            "directive {:?} at {}..{} ({:?})",
            letter,
            self.anchors.start,
            self.pos,
            redirect
        );

        let options = self.options;
        let result = match letter {
            Letter::Byte(b'%') => self.sink.literal(b'%'),

            Letter::Byte(b'A') => self.sink.ip(pred, redirect, IpKind::Local),
            Letter::Byte(b'a') => match name {
                None => self.sink.ip(pred, redirect, IpKind::Client),
                Some("c") => self.sink.ip(pred, redirect, IpKind::Peer),
                Some(_) => return Err(self.fail(ErrorKind::UnrecognisedIpType)),
            },

            Letter::Byte(b'B') => self.sink.resp_size(pred, redirect),
            Letter::Byte(b'b') => self.sink.resp_size_clf(pred, redirect),
            Letter::Byte(b'f') => self.sink.filename(pred, redirect),
            Letter::Byte(b'H') => self.sink.req_protocol(pred, redirect),
            Letter::Byte(b'L') => self.sink.req_logid(pred, redirect),
            Letter::Byte(b'm') => self.sink.req_method(pred, redirect),
            Letter::Byte(b'q') => self.sink.query_string(pred, redirect),
            Letter::Byte(b'r') => self.sink.req_first_line(pred, redirect),
            Letter::Byte(b'R') => self.sink.resp_handler(pred, redirect),
            Letter::Byte(b's') => self.sink.status(pred, redirect),
            Letter::Byte(b'u') => self.sink.remote_user(pred, redirect),
            Letter::Byte(b'U') => self.sink.url_path(pred, redirect),
            Letter::Byte(b'X') => self.sink.conn_status(pred, redirect),
            Letter::Byte(b'I') => self.sink.bytes_recv(pred, redirect),
            Letter::Byte(b'O') => self.sink.bytes_sent(pred, redirect),
            Letter::Byte(b'S') => self.sink.bytes_xfer(pred, redirect),

            Letter::Byte(b'k') => self.sink.keepalive_reqs(pred, redirect, options.keep_alive),
            Letter::Byte(b'l') => self.sink.remote_logname(pred, redirect, options.identity_check),
            Letter::Byte(b'h') => {
                self.sink
                    .remote_hostname(pred, redirect, options.hostname_lookups)
            }
            Letter::Byte(b'v') => self.sink.server_name(pred, redirect, true),
            Letter::Byte(b'V') => {
                self.sink
                    .server_name(pred, redirect, options.use_canonical_name)
            }

            Letter::Byte(b'C') => self.sink.req_cookie(pred, redirect, self.scratch.as_str()),
            Letter::Byte(b'e') => self.sink.env_var(pred, redirect, self.scratch.as_str()),
            Letter::Byte(b'i') => self.sink.req_header(pred, redirect, self.scratch.as_str()),
            Letter::Byte(b'n') => self.sink.note(pred, redirect, self.scratch.as_str()),
            Letter::Byte(b'o') => self.sink.reply_header(pred, redirect, self.scratch.as_str()),
            Letter::ReqTrailer => self.sink.req_trailer(pred, redirect, self.scratch.as_str()),
            Letter::RespTrailer => self.sink.resp_trailer(pred, redirect, self.scratch.as_str()),

            Letter::Byte(b'p') => {
                let port = match name {
                    None => PortKind::Canonical,
                    Some(name) => match PortKind::from_name(name) {
                        Some(port) => port,
                        None => return Err(self.fail(ErrorKind::UnrecognisedPortType)),
                    },
                };
                self.sink.server_port(pred, redirect, port)
            }

            Letter::Byte(b'P') => {
                let id = match name {
                    None => IdKind::Pid,
                    Some(name) => match IdKind::from_name(name) {
                        Some(id) => id,
                        None => return Err(self.fail(ErrorKind::UnrecognisedIdType)),
                    },
                };
                self.sink.id(pred, redirect, id)
            }

            Letter::Byte(b't') => match name {
                None => self.sink.time(pred, redirect, When::Begin, DEFAULT_TIME_FORMAT),
                Some(name) => {
                    self.stage(name)?;
                    let (when, format) = When::split(self.scratch.as_str());
                    match RtimeUnit::from_time_token(format) {
                        Some(unit) => self.sink.time_frac(pred, redirect, when, unit),
                        None => self.sink.time(pred, redirect, when, format),
                    }
                }
            },

            Letter::Byte(b'T') => {
                let unit = match name {
                    None => RtimeUnit::S,
                    Some(name) => match RtimeUnit::from_taken_name(name) {
                        Some(unit) => unit,
                        None => return Err(self.fail(ErrorKind::UnrecognisedRtimeUnit)),
                    },
                };
                self.sink.time_taken(pred, redirect, unit)
            }
            Letter::Byte(b'D') => self.sink.time_taken(pred, redirect, RtimeUnit::Us),

            Letter::Byte(_) => return Err(self.fail(ErrorKind::UnrecognisedDirective)),
        };

        self.hook(result)
    }

    /// Consumes the directive letter, or `^t` plus its selector.
    fn letter(&mut self) -> Result<Letter, Error> {
        let Some(byte) = self.peek() else {
            return Err(self.fail(ErrorKind::MissingDirective));
        };

        self.pos += self.width_at(self.pos).max(1);
        self.anchors.cursor = self.pos;
        if byte != b'^' {
            return Ok(Letter::Byte(byte));
        }

        if self.peek() != Some(b't') {
            self.anchors.cursor = self.pos + self.width_at(self.pos);
            return Err(self.fail(ErrorKind::UnrecognisedDirective));
        }
        self.pos += 1;

        let letter = match self.peek() {
            Some(b'i') => Letter::ReqTrailer,
            Some(b'o') => Letter::RespTrailer,
            _ => {
                self.anchors.cursor = self.pos + self.width_at(self.pos);
                return Err(self.fail(ErrorKind::UnrecognisedDirective));
            }
        };
        self.pos += 1;
        self.anchors.cursor = self.pos;

        Ok(letter)
    }
}
