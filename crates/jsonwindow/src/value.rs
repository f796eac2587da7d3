use core::{fmt, ops::Range};

use bstr::BStr;

use crate::{error::ErrorKind, token::TokenKind};

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueKind {
    /// A string.
    String,
    /// A number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`.
    Null,
    /// An array, `[` through the matching `]`.
    Array,
    /// An object, `{` through the matching `}`.
    Object,
}

impl ValueKind {
    /// The display name of the kind, e.g. `StringValue`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "StringValue",
            ValueKind::Number => "NumberValue",
            ValueKind::Boolean => "BooleanValue",
            ValueKind::Null => "NullValue",
            ValueKind::Array => "ArrayValue",
            ValueKind::Object => "ObjectValue",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<TokenKind> for ValueKind {
    type Error = ErrorKind;

    /// Maps the first token of a value to the kind of that value.
    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::String => Ok(ValueKind::String),
            TokenKind::Number => Ok(ValueKind::Number),
            TokenKind::True | TokenKind::False => Ok(ValueKind::Boolean),
            TokenKind::Null => Ok(ValueKind::Null),
            TokenKind::OpenObject => Ok(ValueKind::Object),
            TokenKind::OpenArray => Ok(ValueKind::Array),
            TokenKind::Comma | TokenKind::Colon | TokenKind::CloseObject | TokenKind::CloseArray => {
                Err(ErrorKind::UnexpectedTokenKind(kind))
            }
        }
    }
}

/// A complete JSON value as a borrowed span of the input.
///
/// Scalars span exactly their token. Arrays and objects span from the opening
/// bracket through the matching closing bracket; whitespace inside is kept,
/// whitespace around is not.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Value<'a> {
    pub(crate) kind: ValueKind,
    pub(crate) raw: &'a [u8],
    pub(crate) offset: usize,
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("raw", &BStr::new(self.raw))
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a> Value<'a> {
    /// The kind of the value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The raw bytes of the value.
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Byte offset of the value in the input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte range of the value in the input.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.raw.len()
    }
}
