//! Window: a read position over a JSON buffer.
//!
//! The window owns nothing but an offset. Each read skips whitespace, asks the
//! tokenizer for the next token and commits the new position only when the
//! read succeeds. Values are built from tokens: scalars wrap a single token,
//! objects and arrays are completed recursively and reported as one span.
//!
//! Invariants
//! - `pos` never decreases across successful reads.
//! - A failed read leaves `pos` where it was before the call.
//! - Peeks never move `pos`.

use core::{convert::Infallible, iter::FusedIterator};

use tracing::{debug, trace};

use crate::{
    error::{Error, ErrorKind, WalkError},
    options::WindowOptions,
    token::{Token, TokenKind, classify, skip_whitespace},
    value::{Value, ValueKind},
};

/// A cursor over a buffer of JSON text.
///
/// ```rust
/// use jsonwindow::{TokenKind, ValueKind, Window};
///
/// let mut window = Window::new(br#" [false, {"k": null}] "#);
/// assert_eq!(window.peek_token_kind().unwrap(), TokenKind::OpenArray);
///
/// let value = window.next_value().unwrap();
/// assert_eq!(value.kind(), ValueKind::Array);
/// assert_eq!(value.raw(), br#"[false, {"k": null}]"#);
/// assert!(window.next_token().unwrap_err().is_eof());
/// ```
#[derive(Debug, Clone)]
pub struct Window<'a> {
    buf: &'a [u8],
    pos: usize,
    options: WindowOptions,
}

impl<'a> Window<'a> {
    /// Creates a window positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, WindowOptions::default())
    }

    /// Creates a window with explicit options.
    #[must_use]
    pub fn with_options(buf: &'a [u8], options: WindowOptions) -> Self {
        Self {
            buf,
            pos: 0,
            options,
        }
    }

    /// The current read offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unread part of the buffer, including any leading whitespace.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Whether only whitespace is left to read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        skip_whitespace(self.buf, self.pos) == self.buf.len()
    }

    /// Reports the kind of the next token without consuming it.
    ///
    /// Only the first byte of the token is examined, so a token that would
    /// fail to scan may still be reported here.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfInput`] if only whitespace remains, or
    /// [`ErrorKind::UnexpectedStartOfToken`].
    pub fn peek_token_kind(&self) -> Result<TokenKind, Error> {
        let start = skip_whitespace(self.buf, self.pos);
        let Some(&first) = self.buf.get(start) else {
            return Err(Error::new(ErrorKind::EndOfInput, self.buf.len()));
        };
        classify(first).map_err(|kind| Error::new(kind, start))
    }

    /// Consumes and returns the next token.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfInput`] if only whitespace remains; any tokenizer
    /// error otherwise (see [`Token::scan`]).
    pub fn next_token(&mut self) -> Result<Token<'a>, Error> {
        let start = skip_whitespace(self.buf, self.pos);
        let token = Token::scan(self.buf, start)?;
        self.pos = token.span().end;
        trace!(
            offset = token.offset,
            kind = %token.kind,
            len = token.raw.len(),
            "token"
        );
        Ok(token)
    }

    /// Consumes and returns the next complete value.
    ///
    /// Objects and arrays are validated all the way to their closing bracket.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::EndOfInput`] if only whitespace remains. Any other error
    /// means the value is malformed; the position is left unchanged.
    pub fn next_value(&mut self) -> Result<Value<'a>, Error> {
        let start = self.pos;
        self.read_value(0).inspect_err(|_| self.pos = start)
    }

    /// Consumes an object, calling `on_entry` with the raw key token and the
    /// value of each member in order.
    ///
    /// Returning `Err` from `on_entry` stops the walk immediately.
    ///
    /// # Errors
    ///
    /// [`WalkError::Syntax`] if the next value is not a well-formed object,
    /// [`WalkError::CallbackFailed`] with the callback's own error. The
    /// position is left unchanged in both cases.
    pub fn next_object<E, F>(&mut self, mut on_entry: F) -> Result<Value<'a>, WalkError<E>>
    where
        F: FnMut(&'a [u8], Value<'a>) -> Result<(), E>,
    {
        let start = self.pos;
        self.expect_token(TokenKind::OpenObject)
            .map_err(WalkError::from)
            .and_then(|open| self.complete_object(open.offset, 1, &mut on_entry))
            .inspect_err(|_| self.pos = start)
    }

    /// Consumes an array, calling `on_element` with the zero-based index and
    /// the value of each element in order.
    ///
    /// Returning `Err` from `on_element` stops the walk immediately.
    ///
    /// # Errors
    ///
    /// As for [`Window::next_object`].
    pub fn next_array<E, F>(&mut self, mut on_element: F) -> Result<Value<'a>, WalkError<E>>
    where
        F: FnMut(usize, Value<'a>) -> Result<(), E>,
    {
        let start = self.pos;
        self.expect_token(TokenKind::OpenArray)
            .map_err(WalkError::from)
            .and_then(|open| self.complete_array(open.offset, 1, &mut on_element))
            .inspect_err(|_| self.pos = start)
    }

    /// Reads a value; `depth` is the nesting depth of its container.
    fn read_value(&mut self, depth: usize) -> Result<Value<'a>, Error> {
        let token = if depth == 0 {
            self.next_token()?
        } else {
            self.next_inner_token()?
        };
        let kind =
            ValueKind::try_from(token.kind).map_err(|kind| Error::new(kind, token.offset))?;
        match kind {
            ValueKind::Object => self
                .complete_object(token.offset, depth + 1, &mut |_: &'a [u8], _: Value<'a>| {
                    Ok::<(), Infallible>(())
                })
                .map_err(WalkError::into_syntax),
            ValueKind::Array => self
                .complete_array(token.offset, depth + 1, &mut |_: usize, _: Value<'a>| {
                    Ok::<(), Infallible>(())
                })
                .map_err(WalkError::into_syntax),
            ValueKind::String | ValueKind::Number | ValueKind::Boolean | ValueKind::Null => {
                Ok(Value {
                    kind,
                    raw: token.raw,
                    offset: token.offset,
                })
            }
        }
    }

    /// Completes an object whose `{` at `start` has already been consumed.
    fn complete_object<E, F>(
        &mut self,
        start: usize,
        depth: usize,
        on_entry: &mut F,
    ) -> Result<Value<'a>, WalkError<E>>
    where
        F: FnMut(&'a [u8], Value<'a>) -> Result<(), E>,
    {
        self.check_depth(start, depth)?;
        if self.peek_inner_kind()? == TokenKind::CloseObject {
            let close = self.next_token()?;
            return Ok(self.span_value(ValueKind::Object, start, close));
        }
        loop {
            let key = self.expect_inner_token(TokenKind::String)?;
            self.expect_inner_token(TokenKind::Colon)?;
            let value = self.read_value(depth)?;
            if let Err(err) = on_entry(key.raw, value) {
                debug!(offset = value.offset, "object walk stopped by callback");
                return Err(WalkError::CallbackFailed(err));
            }
            let next = self.next_inner_token()?;
            match next.kind {
                TokenKind::Comma => {}
                TokenKind::CloseObject => return Ok(self.span_value(ValueKind::Object, start, next)),
                other => {
                    return Err(Error::new(ErrorKind::UnexpectedTokenKind(other), next.offset).into());
                }
            }
        }
    }

    /// Completes an array whose `[` at `start` has already been consumed.
    fn complete_array<E, F>(
        &mut self,
        start: usize,
        depth: usize,
        on_element: &mut F,
    ) -> Result<Value<'a>, WalkError<E>>
    where
        F: FnMut(usize, Value<'a>) -> Result<(), E>,
    {
        self.check_depth(start, depth)?;
        if self.peek_inner_kind()? == TokenKind::CloseArray {
            let close = self.next_token()?;
            return Ok(self.span_value(ValueKind::Array, start, close));
        }
        let mut index = 0;
        loop {
            let value = self.read_value(depth)?;
            if let Err(err) = on_element(index, value) {
                debug!(offset = value.offset, index, "array walk stopped by callback");
                return Err(WalkError::CallbackFailed(err));
            }
            index += 1;
            let next = self.next_inner_token()?;
            match next.kind {
                TokenKind::Comma => {}
                TokenKind::CloseArray => return Ok(self.span_value(ValueKind::Array, start, next)),
                other => {
                    return Err(Error::new(ErrorKind::UnexpectedTokenKind(other), next.offset).into());
                }
            }
        }
    }

    fn check_depth(&self, start: usize, depth: usize) -> Result<(), Error> {
        match self.options.max_depth {
            Some(limit) if depth > limit => {
                debug!(offset = start, limit, "depth limit exceeded");
                Err(Error::new(ErrorKind::DepthLimitExceeded(limit), start))
            }
            _ => Ok(()),
        }
    }

    fn span_value(&self, kind: ValueKind, start: usize, close: Token<'a>) -> Value<'a> {
        let end = close.span().end;
        trace!(offset = start, kind = %kind, len = end - start, "value");
        Value {
            kind,
            raw: &self.buf[start..end],
            offset: start,
        }
    }

    /// Like [`Window::next_token`], but the end of input is never clean.
    fn next_inner_token(&mut self) -> Result<Token<'a>, Error> {
        self.next_token().map_err(truncated)
    }

    fn peek_inner_kind(&self) -> Result<TokenKind, Error> {
        self.peek_token_kind().map_err(truncated)
    }

    fn expect_token(&mut self, kind: TokenKind) -> Result<Token<'a>, Error> {
        let token = self.next_token()?;
        expect_kind(token, kind)
    }

    fn expect_inner_token(&mut self, kind: TokenKind) -> Result<Token<'a>, Error> {
        let token = self.next_inner_token()?;
        expect_kind(token, kind)
    }
}

fn expect_kind(token: Token<'_>, kind: TokenKind) -> Result<Token<'_>, Error> {
    if token.kind == kind {
        Ok(token)
    } else {
        Err(Error::new(
            ErrorKind::UnexpectedTokenKind(token.kind),
            token.offset,
        ))
    }
}

fn truncated(err: Error) -> Error {
    if err.is_eof() {
        Error::new(ErrorKind::UnexpectedEndOfInput, err.offset)
    } else {
        err
    }
}

/// Iterator over every token of a buffer, created by [`tokenize`].
///
/// Iteration ends at a clean end of input. A malformed token is yielded once
/// as an error, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    window: Window<'a>,
    done: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.window.next_token() {
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                if err.is_eof() { None } else { Some(Err(err)) }
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Returns an iterator over the tokens of `buf`, skipping whitespace.
///
/// ```rust
/// use jsonwindow::{TokenKind, tokenize};
///
/// let kinds: Vec<TokenKind> = tokenize(b"[false,true]")
///     .map(|token| token.unwrap().kind())
///     .collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::OpenArray,
///         TokenKind::False,
///         TokenKind::Comma,
///         TokenKind::True,
///         TokenKind::CloseArray,
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(buf: &[u8]) -> Tokens<'_> {
    Tokens {
        window: Window::new(buf),
        done: false,
    }
}
