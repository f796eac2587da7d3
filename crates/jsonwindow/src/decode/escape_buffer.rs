//! Accumulates the four hex digits of a `\uXXXX` escape into a UTF-16 code
//! unit.
//!
//! Digits are fed one byte at a time. After the fourth digit the code unit is
//! returned and the accumulator resets to begin a new escape. Surrogates are
//! returned as-is; pairing them is up to the caller.

use super::DecodeError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u16::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(None)` until the fourth digit, then `Ok(Some(unit))`.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, DecodeError> {
        let Some(d) = Self::hex_val(b) else {
            self.reset();
            return Err(DecodeError::InvalidHexDigit(b));
        };

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}
