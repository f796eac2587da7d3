//! Byte-class lookup table used for first-byte dispatch.
//!
//! Every byte value maps to exactly one class. JSON token-starting bytes are
//! disjoint, so a single indexed read decides the token kind; whitespace gets
//! its own class so the window can skip it with the same table.

use super::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteClass {
    Invalid,
    Whitespace,
    Start(TokenKind),
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..256, always fits in u8"
)]
pub(crate) static BYTE_CLASS: [ByteClass; 256] = {
    let mut table = [ByteClass::Invalid; 256];
    let mut i = 0usize;
    while i < 256 {
        table[i] = match i as u8 {
            b' ' | b'\t' | b'\n' | b'\r' => ByteClass::Whitespace,
            b'"' => ByteClass::Start(TokenKind::String),
            b'-' | b'0'..=b'9' => ByteClass::Start(TokenKind::Number),
            b',' => ByteClass::Start(TokenKind::Comma),
            b':' => ByteClass::Start(TokenKind::Colon),
            b'{' => ByteClass::Start(TokenKind::OpenObject),
            b'}' => ByteClass::Start(TokenKind::CloseObject),
            b'[' => ByteClass::Start(TokenKind::OpenArray),
            b']' => ByteClass::Start(TokenKind::CloseArray),
            b't' => ByteClass::Start(TokenKind::True),
            b'f' => ByteClass::Start(TokenKind::False),
            b'n' => ByteClass::Start(TokenKind::Null),
            _ => ByteClass::Invalid,
        };
        i += 1;
    }
    table
};

#[inline]
pub(crate) fn class_of(byte: u8) -> ByteClass {
    BYTE_CLASS[usize::from(byte)]
}
