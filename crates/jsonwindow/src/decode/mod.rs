//! Decoding of raw string tokens.
//!
//! The scanner never unescapes. Callers that need the text of a string token
//! pass its raw bytes (quotes included) to [`decode_string_token`]. Tokens
//! without a backslash are returned as a borrowed slice of their interior;
//! anything else is decoded into a fresh buffer.

mod escape_buffer;

use alloc::{borrow::Cow, vec::Vec};

use bstr::ByteSlice;
use escape_buffer::UnicodeEscapeBuffer;
use thiserror::Error;

/// Why a string token could not be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input is shorter than an empty string token (`""`).
    #[error("string token too short")]
    TooShort,
    /// The input does not start and end with a quote.
    #[error("string token must start and end with a quote")]
    MissingQuote,
    /// The input ends inside an escape sequence.
    #[error("string token ends inside an escape sequence")]
    Truncated,
    /// A backslash is followed by an unknown escape character.
    #[error("invalid escape character 0x{0:02x}")]
    InvalidEscape(u8),
    /// A `\u` escape contains a non-hex digit.
    #[error("invalid hex digit 0x{0:02x} in unicode escape")]
    InvalidHexDigit(u8),
    /// A surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u16),
    /// An unescaped quote before the closing quote.
    #[error("unescaped quote within string token")]
    UnescapedQuote,
    /// An unescaped control character.
    #[error("control character 0x{0:02x} must be escaped")]
    ControlCharacter(u8),
}

/// Decodes a raw string token, including its surrounding quotes, into the
/// bytes of the string it denotes.
///
/// The result is UTF-8 whenever the token is. Escapes are decoded per JSON,
/// with `\uXXXX` surrogate pairs combined into one code point.
///
/// Tokens with no backslash take a fast path: the interior is returned
/// borrowed and is not otherwise validated.
///
/// ```rust
/// use std::borrow::Cow;
///
/// use jsonwindow::decode_string_token;
///
/// assert_eq!(decode_string_token(br#""plain""#).unwrap(), Cow::Borrowed(&b"plain"[..]));
/// assert_eq!(decode_string_token(br#""\uD55C""#).unwrap(), "한".as_bytes());
/// assert_eq!(decode_string_token(br#""\uD83C\uDF63""#).unwrap(), "🍣".as_bytes());
/// ```
///
/// # Errors
///
/// See [`DecodeError`].
pub fn decode_string_token(raw: &[u8]) -> Result<Cow<'_, [u8]>, DecodeError> {
    if raw.len() < 2 {
        return Err(DecodeError::TooShort);
    }
    if raw[0] != b'"' || raw[raw.len() - 1] != b'"' {
        return Err(DecodeError::MissingQuote);
    }
    let inner = &raw[1..raw.len() - 1];
    match inner.find_byte(b'\\') {
        None => Ok(Cow::Borrowed(inner)),
        Some(first) => decode_escaped(inner, first).map(Cow::Owned),
    }
}

/// Slow path. `first` is the offset of the first backslash in `inner`.
fn decode_escaped(inner: &[u8], first: usize) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(inner.len());
    out.extend_from_slice(&inner[..first]);
    let mut hex = UnicodeEscapeBuffer::new();
    let mut i = first;
    while let Some(&b) = inner.get(i) {
        match b {
            b'\\' => {
                let esc = *inner.get(i + 1).ok_or(DecodeError::Truncated)?;
                i += 2;
                let unescaped = match esc {
                    b'"' => b'"',
                    b'\\' => b'\\',
                    b'/' => b'/',
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        let ch = read_unicode_escape(inner, &mut i, &mut hex)?;
                        let mut utf8 = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                        continue;
                    }
                    other => return Err(DecodeError::InvalidEscape(other)),
                };
                out.push(unescaped);
            }
            b'"' => return Err(DecodeError::UnescapedQuote),
            0x00..=0x1f => return Err(DecodeError::ControlCharacter(b)),
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(out)
}

/// Decodes the code point of a `\u` escape whose hex digits start at `*i`,
/// consuming a trailing low surrogate escape when the first unit is a high
/// surrogate.
fn read_unicode_escape(
    inner: &[u8],
    i: &mut usize,
    hex: &mut UnicodeEscapeBuffer,
) -> Result<char, DecodeError> {
    let unit = read_code_unit(inner, i, hex)?;
    let code = match unit {
        0xD800..=0xDBFF => {
            if inner.get(*i..*i + 2) != Some(&b"\\u"[..]) {
                return Err(DecodeError::LoneSurrogate(unit));
            }
            *i += 2;
            let low = read_code_unit(inner, i, hex)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(DecodeError::LoneSurrogate(unit));
            }
            0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
        }
        0xDC00..=0xDFFF => return Err(DecodeError::LoneSurrogate(unit)),
        _ => u32::from(unit),
    };
    // Surrogates are excluded above, so every remaining code is a scalar.
    char::from_u32(code).ok_or(DecodeError::LoneSurrogate(unit))
}

fn read_code_unit(
    inner: &[u8],
    i: &mut usize,
    hex: &mut UnicodeEscapeBuffer,
) -> Result<u16, DecodeError> {
    hex.reset();
    loop {
        let b = *inner.get(*i).ok_or(DecodeError::Truncated)?;
        *i += 1;
        if let Some(unit) = hex.feed(b)? {
            return Ok(unit);
        }
    }
}
