//! Tokenizer: recognizes a single JSON token at a byte offset.
//!
//! The tokenizer is stateless. Classification looks at the first byte only
//! (see [`lut`]); scanning then walks forward to find the exact end of the
//! token. No value is computed and nothing is copied: a [`Token`] is the kind
//! plus a borrowed slice of the input.

mod lut;

use core::{fmt, ops::Range};

use bstr::BStr;

use crate::error::{Error, ErrorKind};
pub(crate) use lut::{ByteClass, class_of};

/// The lexical kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// A string, including its quotes.
    String,
    /// A number such as `-1.5e3`.
    Number,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `{`
    OpenObject,
    /// `}`
    CloseObject,
    /// `[`
    OpenArray,
    /// `]`
    CloseArray,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl TokenKind {
    /// The display name of the kind, e.g. `StringToken`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::String => "StringToken",
            TokenKind::Number => "NumberToken",
            TokenKind::Comma => "CommaToken",
            TokenKind::Colon => "ColonToken",
            TokenKind::OpenObject => "OpenObjectToken",
            TokenKind::CloseObject => "CloseObjectToken",
            TokenKind::OpenArray => "OpenArrayToken",
            TokenKind::CloseArray => "CloseArrayToken",
            TokenKind::True => "TrueToken",
            TokenKind::False => "FalseToken",
            TokenKind::Null => "NullToken",
        }
    }

    /// Whether a value can begin with a token of this kind.
    #[must_use]
    pub fn starts_value(self) -> bool {
        !matches!(
            self,
            TokenKind::Comma | TokenKind::Colon | TokenKind::CloseObject | TokenKind::CloseArray
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines the kind of token that starts with `byte`.
///
/// # Errors
///
/// [`ErrorKind::UnexpectedStartOfToken`] if no JSON token starts with `byte`.
/// Whitespace is not a token and is rejected too.
pub fn classify(byte: u8) -> Result<TokenKind, ErrorKind> {
    match class_of(byte) {
        ByteClass::Start(kind) => Ok(kind),
        ByteClass::Whitespace | ByteClass::Invalid => Err(ErrorKind::UnexpectedStartOfToken(byte)),
    }
}

/// Returns the offset of the first non-whitespace byte at or after `pos`.
#[inline]
pub(crate) fn skip_whitespace(buf: &[u8], mut pos: usize) -> usize {
    while buf
        .get(pos)
        .is_some_and(|&b| class_of(b) == ByteClass::Whitespace)
    {
        pos += 1;
    }
    pos
}

/// A single token: its kind and the exact bytes it occupies in the input.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) raw: &'a [u8],
    pub(crate) offset: usize,
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("raw", &BStr::new(self.raw))
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a> Token<'a> {
    /// Scans the token that begins exactly at `start`.
    ///
    /// No whitespace is skipped; `buf[start]` must be the first byte of the
    /// token.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::EndOfInput`] if `start` is at or past the end of `buf`.
    /// - [`ErrorKind::UnexpectedStartOfToken`] if `buf[start]` starts no token.
    /// - [`ErrorKind::UnexpectedEndOfInput`] if the buffer ends mid-token.
    /// - [`ErrorKind::UnexpectedCharWithinToken`] for a keyword mismatch or a
    ///   malformed number.
    /// - [`ErrorKind::InvalidStringEscape`], [`ErrorKind::InvalidHexDigit`],
    ///   [`ErrorKind::OutOfRangeStringChar`] for malformed strings.
    pub fn scan(buf: &'a [u8], start: usize) -> Result<Self, Error> {
        let Some(&first) = buf.get(start) else {
            return Err(Error::new(ErrorKind::EndOfInput, buf.len()));
        };
        let kind = classify(first).map_err(|kind| Error::new(kind, start))?;
        let end = match kind {
            TokenKind::String => scan_string(buf, start)?,
            TokenKind::Number => scan_number(buf, start)?,
            TokenKind::True => scan_keyword(buf, start, b"true")?,
            TokenKind::False => scan_keyword(buf, start, b"false")?,
            TokenKind::Null => scan_keyword(buf, start, b"null")?,
            TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::OpenObject
            | TokenKind::CloseObject
            | TokenKind::OpenArray
            | TokenKind::CloseArray => start + 1,
        };
        Ok(Token {
            kind,
            raw: &buf[start..end],
            offset: start,
        })
    }

    /// The kind of the token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw bytes of the token. Strings include their quotes.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Byte offset of the token in the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte range of the token in the input.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.raw.len()
    }
}

#[inline]
fn unexpected_end(buf: &[u8]) -> Error {
    Error::new(ErrorKind::UnexpectedEndOfInput, buf.len())
}

fn scan_keyword(buf: &[u8], start: usize, keyword: &'static [u8]) -> Result<usize, Error> {
    for (i, &expected) in keyword.iter().enumerate() {
        match buf.get(start + i) {
            None => return Err(unexpected_end(buf)),
            Some(&b) if b != expected => {
                return Err(Error::new(
                    ErrorKind::UnexpectedCharWithinToken(b),
                    start + i,
                ));
            }
            Some(_) => {}
        }
    }
    Ok(start + keyword.len())
}

fn scan_string(buf: &[u8], start: usize) -> Result<usize, Error> {
    let mut i = start + 1;
    loop {
        let Some(&b) = buf.get(i) else {
            return Err(unexpected_end(buf));
        };
        match b {
            b'"' => return Ok(i + 1),
            b'\\' => i = scan_escape(buf, i + 1)?,
            0x00..=0x1f => return Err(Error::new(ErrorKind::OutOfRangeStringChar(b), i)),
            0x20..=0x7f => i += 1,
            _ => {
                // Invalid UTF-8 still advances; only control characters are
                // rejected.
                let (_, len) = bstr::decode_utf8(&buf[i..]);
                i += len;
            }
        }
    }
}

/// `i` points just past the backslash.
fn scan_escape(buf: &[u8], i: usize) -> Result<usize, Error> {
    let Some(&b) = buf.get(i) else {
        return Err(unexpected_end(buf));
    };
    match b {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(i + 1),
        b'u' => {
            for j in i + 1..i + 5 {
                match buf.get(j) {
                    None => return Err(unexpected_end(buf)),
                    Some(&h) if !h.is_ascii_hexdigit() => {
                        return Err(Error::new(ErrorKind::InvalidHexDigit(h), j));
                    }
                    Some(_) => {}
                }
            }
            Ok(i + 5)
        }
        _ => Err(Error::new(ErrorKind::InvalidStringEscape(b), i)),
    }
}

fn scan_number(buf: &[u8], start: usize) -> Result<usize, Error> {
    let mut i = start;
    if buf[i] == b'-' {
        i += 1;
    }
    match buf.get(i) {
        None => return Err(unexpected_end(buf)),
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = skip_digits(buf, i + 1),
        Some(&b) => return Err(Error::new(ErrorKind::UnexpectedCharWithinToken(b), i)),
    }
    if buf.get(i) == Some(&b'.') {
        i = expect_digits(buf, i + 1)?;
    }
    if matches!(buf.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(buf.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        i = expect_digits(buf, i)?;
    }
    Ok(i)
}

/// One or more digits are required at `i`.
fn expect_digits(buf: &[u8], i: usize) -> Result<usize, Error> {
    match buf.get(i) {
        None => Err(unexpected_end(buf)),
        Some(b) if b.is_ascii_digit() => Ok(skip_digits(buf, i + 1)),
        Some(&b) => Err(Error::new(ErrorKind::UnexpectedCharWithinToken(b), i)),
    }
}

fn skip_digits(buf: &[u8], mut i: usize) -> usize {
    while buf.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
