use core::convert::Infallible;

use thiserror::Error;

use crate::token::TokenKind;

/// A failed read, positioned at the byte where scanning stopped.
///
/// `offset` is an absolute byte offset into the buffer the [`Window`] was
/// built over. For [`ErrorKind::EndOfInput`] and
/// [`ErrorKind::UnexpectedEndOfInput`] it is the length of the buffer.
///
/// [`Window`]: crate::Window
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Absolute byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether this is a clean end of input: no token was left to read, and
    /// the input ended at a token boundary.
    ///
    /// Every other error kind means the input is malformed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == ErrorKind::EndOfInput
    }
}

/// The kinds of failure the tokenizer and walker report.
///
/// Running out of input has two names. [`ErrorKind::EndOfInput`] is the clean
/// end between tokens, the `io.EOF` of a reader. Input that stops where more
/// was required, such as the unterminated string `"ab`, is
/// [`ErrorKind::UnexpectedEndOfInput`], the truncation error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No more tokens: only whitespace (or nothing) remained.
    #[error("end of input")]
    EndOfInput,
    /// The buffer ended in the middle of a token or a structure.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The byte cannot start any JSON token.
    #[error("unexpected byte 0x{0:02x} at start of token")]
    UnexpectedStartOfToken(u8),
    /// A byte inside a keyword or number violates its grammar.
    #[error("unexpected byte 0x{0:02x} within token")]
    UnexpectedCharWithinToken(u8),
    /// A backslash in a string is followed by an unknown escape character.
    #[error("invalid string escape character 0x{0:02x}")]
    InvalidStringEscape(u8),
    /// A `\u` escape is not followed by four hex digits.
    #[error("invalid hex digit 0x{0:02x} in unicode escape")]
    InvalidHexDigit(u8),
    /// An unescaped control character appears inside a string.
    #[error("control character 0x{0:02x} must be escaped within string")]
    OutOfRangeStringChar(u8),
    /// A well-formed token appears where the grammar does not allow it.
    #[error("unexpected {0}")]
    UnexpectedTokenKind(TokenKind),
    /// Objects and arrays nest deeper than [`WindowOptions::max_depth`].
    ///
    /// [`WindowOptions::max_depth`]: crate::WindowOptions::max_depth
    #[error("nesting exceeds depth limit of {0}")]
    DepthLimitExceeded(usize),
}

/// The failure of a callback-driven walk.
///
/// Either the input was malformed, or the callback itself returned an error
/// and the walk stopped without reading further.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WalkError<E> {
    /// The input is not valid JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] Error),
    /// The callback returned an error, forwarded as-is.
    #[error("callback failed: {0}")]
    CallbackFailed(E),
}

impl<E> WalkError<E> {
    /// The syntax error, if the walk failed on malformed input.
    #[must_use]
    pub fn syntax(&self) -> Option<&Error> {
        match self {
            WalkError::Syntax(err) => Some(err),
            WalkError::CallbackFailed(_) => None,
        }
    }
}

impl WalkError<Infallible> {
    pub(crate) fn into_syntax(self) -> Error {
        match self {
            WalkError::Syntax(err) => err,
            WalkError::CallbackFailed(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;
    use crate::{Token, Window};

    #[test]
    fn unterminated_string_is_truncation_not_clean_end() {
        let err = Token::scan(br#""ab"#, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.offset(), 3);
        assert!(!err.is_eof());
    }

    #[rstest]
    #[case("")]
    #[case(" \n")]
    #[case("[] ")]
    fn clean_end_between_tokens(#[case] input: &str) {
        let mut window = Window::new(input.as_bytes());
        while window.next_token().is_ok() {}
        let err = window.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndOfInput);
        assert!(err.is_eof());
        assert_eq!(err.offset(), input.len());
    }

    #[test]
    fn display_names_both_ends() {
        let clean = Error::new(ErrorKind::EndOfInput, 0);
        let truncated = Error::new(ErrorKind::UnexpectedEndOfInput, 3);
        assert_eq!(clean.to_string(), "end of input at offset 0");
        assert_eq!(truncated.to_string(), "unexpected end of input at offset 3");
    }
}
