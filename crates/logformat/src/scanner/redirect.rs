use super::Scanner;
use crate::error::{Error, ErrorKind};
use crate::ir::Redirect;
use crate::sink::Sink;

impl<S: Sink + ?Sized> Scanner<'_, S> {
    /// Consumes an explicit `<` or `>`.
    ///
    /// Without one the caller falls back to [`Redirect::default_for`] once
    /// the directive letter is known.
    pub(super) fn redirect_marker(&mut self) -> Result<Option<Redirect>, Error> {
        let Some(redirect) = self.peek().and_then(Redirect::from_marker) else {
            return Ok(None);
        };

        self.anchors.marker = Some(self.pos);
        self.pos += 1;

        if self.peek().and_then(Redirect::from_marker).is_some() {
            self.anchors.cursor = self.pos + 1;
            return Err(self.fail(ErrorKind::TooManyRedirectFlags));
        }

        Ok(Some(redirect))
    }
}
