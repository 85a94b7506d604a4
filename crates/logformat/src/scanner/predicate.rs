use super::Scanner;
use crate::error::{Error, ErrorKind};
use crate::ir::{MAX_STATUS, Predicate};
use crate::sink::Sink;

impl<S: Sink + ?Sized> Scanner<'_, S> {
    /// Consumes an optional `!` and comma-separated status codes following `%`.
    ///
    /// Scanning stops at the first byte that continues neither a number nor
    /// the list. A trailing comma after a number is consumed. No codes at all
    /// is not an error.
    pub(super) fn predicate(&mut self) -> Result<Predicate, Error> {
        let mut predicate = Predicate::new();

        if self.peek() == Some(b'!') {
            predicate.negate();
            self.pos += 1;
        }

        loop {
            let digits = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == digits {
                break;
            }

            self.anchors.digits = Some(digits..self.pos);
            self.anchors.cursor = self.pos;

            // Zero is a valid code; only the upper bound is checked.
            let status = self.input[digits..self.pos]
                .parse::<u32>()
                .ok()
                .filter(|&status| status <= MAX_STATUS)
                .ok_or_else(|| self.fail(ErrorKind::StatusOverflow))?;

            predicate
                .push(status)
                .map_err(|_| self.fail(ErrorKind::TooManyStatuses))?;

            if self.peek() != Some(b',') {
                break;
            }
            self.pos += 1;
        }

        predicate.normalize();
        Ok(predicate)
    }
}
