use std::ops::Range;

use super::Scanner;
use crate::error::{Error, ErrorKind};
use crate::sink::Sink;

/// Usable capacity of [`Scratch::default`].
pub const DEFAULT_SCRATCH_CAPACITY: usize = 127;

/// Bounded, caller-owned storage for directive arguments.
///
/// Names handed to a sink (`%{NAME}i` and friends) and `%{...}t` patterns are
/// copied here before the call. An argument longer than the capacity is
/// rejected with [`ErrorKind::NameOverflow`]. Reusing one `Scratch` across
/// many parses avoids reallocating it; concurrent parses each need their own.
#[derive(Debug, Clone)]
pub struct Scratch {
    buf: String,
    capacity: usize,
}

/// An argument did not fit in a [`Scratch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("argument of {len} bytes exceeds scratch capacity of {capacity}")]
pub struct CapacityExceeded {
    pub len: usize,
    pub capacity: usize,
}

impl Default for Scratch {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SCRATCH_CAPACITY)
    }
}

impl Scratch {
    /// Storage for arguments of up to `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Longest name, in bytes, the buffer will hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces the contents with `text`, or leaves them cleared if it does not fit.
    pub fn fill(&mut self, text: &str) -> Result<(), CapacityExceeded> {
        self.buf.clear();
        if text.len() > self.capacity {
            return Err(CapacityExceeded {
                len: text.len(),
                capacity: self.capacity,
            });
        }
        self.buf.push_str(text);
        Ok(())
    }

    /// The most recently filled name.
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl<S: Sink + ?Sized> Scanner<'_, S> {
    /// Consumes an optional `{...}` and returns the range between the braces.
    ///
    /// Braces do not nest: the first `}` closes the argument.
    pub(super) fn argument(&mut self) -> Result<Option<Range<usize>>, Error> {
        if self.peek() != Some(b'{') {
            return Ok(None);
        }

        let brace = self.pos;
        self.anchors.brace = Some(brace);

        let open = brace + 1;
        let Some(len) = self.bytes[open..].iter().position(|&b| b == b'}') else {
            self.pos = self.bytes.len();
            self.anchors.cursor = self.pos;
            return Err(self.fail(ErrorKind::MissingClosingBrace));
        };

        if len == 0 {
            self.anchors.cursor = open + 1;
            return Err(self.fail(ErrorKind::EmptyName));
        }

        let name = open..open + len;
        self.anchors.name = Some(name.clone());
        self.pos = name.end + 1;
        Ok(Some(name))
    }

    /// Copies an argument into the scratch buffer ahead of a sink call.
    pub(super) fn stage(&mut self, text: &str) -> Result<(), Error> {
        self.scratch
            .fill(text)
            .map_err(|_| self.fail(ErrorKind::NameOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_at_capacity() {
        let mut scratch = Scratch::with_capacity(4);
        assert!(scratch.fill("abcd").is_ok());
        assert_eq!(scratch.as_str(), "abcd");
    }

    #[test]
    fn test_fill_past_capacity_clears() {
        let mut scratch = Scratch::with_capacity(4);
        scratch.fill("ab").unwrap();
        assert_eq!(
            scratch.fill("abcde"),
            Err(CapacityExceeded {
                len: 5,
                capacity: 4
            })
        );
        assert_eq!(scratch.as_str(), "");
    }
}
