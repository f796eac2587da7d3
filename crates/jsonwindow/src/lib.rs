//! A zero-copy, lazy JSON scanner.
//!
//! `jsonwindow` reads JSON text out of a byte buffer that is already fully in
//! memory. It never builds a parsed representation of the input: every token
//! and every value it hands out is a borrowed sub-slice of the original
//! buffer, tagged with its kind and byte offset. Decoding string contents is
//! left to the caller via [`decode_string_token`].
//!
//! There are three layers:
//!
//! - the tokenizer ([`Token::scan`], [`tokenize`]) recognizes a single
//!   lexical token at a given offset;
//! - the [`Window`] keeps a read position, skips whitespace, and exposes
//!   [`Window::next_token`], [`Window::peek_token_kind`] and
//!   [`Window::next_value`];
//! - the walkers ([`walk_object`], [`walk_array`], [`Window::next_object`],
//!   [`Window::next_array`]) validate nested structure and report the raw
//!   spans of each entry to a callback.
//!
//! ```rust
//! let mut keys = Vec::new();
//! jsonwindow::walk_object(br#"{"foo":"bar","baz":["a",2,"c"]}"#, |key, value| {
//!     keys.push((key, value));
//!     Ok::<(), core::convert::Infallible>(())
//! })
//! .unwrap();
//! assert_eq!(keys[0], (&br#""foo""#[..], &br#""bar""#[..]));
//! assert_eq!(keys[1].1, br#"["a",2,"c"]"#);
//! ```
//!
//! Nesting depth is unbounded unless [`WindowOptions::max_depth`] is set, so
//! hostile input can exhaust the call stack of the walker.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decode;
mod error;
mod options;
mod token;
mod value;
mod walk;
mod window;

#[cfg(test)]
mod tests;

pub use decode::{DecodeError, decode_string_token};
pub use error::{Error, ErrorKind, WalkError};
pub use options::WindowOptions;
pub use token::{Token, TokenKind, classify};
pub use value::{Value, ValueKind};
pub use walk::{walk_array, walk_object};
pub use window::{Tokens, Window, tokenize};
