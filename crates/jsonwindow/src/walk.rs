//! One-shot walkers over a buffer that holds a single object or array.

use crate::{
    error::{Error, ErrorKind, WalkError},
    window::Window,
};

/// Walks the top-level members of the object at the start of `buf`.
///
/// Leading whitespace is skipped and the first token must be `{`. The
/// callback receives the raw key token (quotes included) and the raw value of
/// each member, in input order. Bytes after the closing `}` are not examined.
///
/// Returning `Err` from the callback stops the walk: no further input is read
/// and the error is returned as [`WalkError::CallbackFailed`].
///
/// ```rust
/// use jsonwindow::{WalkError, walk_object};
///
/// let mut pairs = Vec::new();
/// walk_object(br#"{"foo":"bar"}"#, |key, value| {
///     pairs.push((key, value));
///     Ok::<(), ()>(())
/// })
/// .unwrap();
/// assert_eq!(pairs, [(&br#""foo""#[..], &br#""bar""#[..])]);
///
/// let err = walk_object(br#"{"a":1,"b":2}"#, |_, _| Err("stop")).unwrap_err();
/// assert_eq!(err, WalkError::CallbackFailed("stop"));
/// ```
///
/// # Errors
///
/// [`WalkError::Syntax`] if the input does not start with a well-formed
/// object, [`WalkError::CallbackFailed`] if the callback failed.
pub fn walk_object<'a, E, F>(buf: &'a [u8], mut callback: F) -> Result<(), WalkError<E>>
where
    F: FnMut(&'a [u8], &'a [u8]) -> Result<(), E>,
{
    Window::new(buf)
        .next_object(|key, value| callback(key, value.raw()))
        .map(|_| ())
        .map_err(truncated)
}

/// Walks the top-level elements of the array at the start of `buf`.
///
/// The array counterpart of [`walk_object`]: the callback receives the
/// zero-based index and raw value of each element.
///
/// # Errors
///
/// As for [`walk_object`].
pub fn walk_array<'a, E, F>(buf: &'a [u8], mut callback: F) -> Result<(), WalkError<E>>
where
    F: FnMut(usize, &'a [u8]) -> Result<(), E>,
{
    Window::new(buf)
        .next_array(|index, value| callback(index, value.raw()))
        .map(|_| ())
        .map_err(truncated)
}

/// An object or array was required, so running out of input is never clean.
fn truncated<E>(err: WalkError<E>) -> WalkError<E> {
    match err {
        WalkError::Syntax(err) if err.is_eof() => {
            WalkError::Syntax(Error::new(ErrorKind::UnexpectedEndOfInput, err.offset()))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use rstest::rstest;

    use super::*;
    use crate::token::TokenKind;

    fn record_object(input: &str) -> Result<Vec<(&[u8], &[u8])>, WalkError<()>> {
        let mut calls = Vec::new();
        walk_object(input.as_bytes(), |key, value| {
            calls.push((key, value));
            Ok(())
        })?;
        Ok(calls)
    }

    #[rstest]
    #[case("{}", vec![])]
    #[case(r#"{"foo":"bar"}"#, vec![(r#""foo""#, r#""bar""#)])]
    #[case(r#"{"foo":"bar","baz":["a",2,"c"]}"#, vec![
        (r#""foo""#, r#""bar""#),
        (r#""baz""#, r#"["a",2,"c"]"#),
    ])]
    #[case(r#"{"k1":[1,2,3],"k2":{"x":"y","z":"w"}}"#, vec![
        (r#""k1""#, "[1,2,3]"),
        (r#""k2""#, r#"{"x":"y","z":"w"}"#),
    ])]
    #[case(r#"{"k1": [1, 2, 3], "k2": {"x": "y", "z": "w"}}"#, vec![
        (r#""k1""#, "[1, 2, 3]"),
        (r#""k2""#, r#"{"x": "y", "z": "w"}"#),
    ])]
    #[case("\n\t{ \"a\" :\r\ntrue }  trailing", vec![(r#""a""#, "true")])]
    fn object_members(#[case] input: &str, #[case] expected: Vec<(&str, &str)>) {
        let expected: Vec<(&[u8], &[u8])> = expected
            .into_iter()
            .map(|(k, v)| (k.as_bytes(), v.as_bytes()))
            .collect();
        assert_eq!(record_object(input).unwrap(), expected);
    }

    #[rstest]
    #[case(r#""""#)]
    #[case(r#""X""#)]
    #[case(r#""ሴ""#)]
    #[case(r#""_ሴ_""#)]
    #[case(r#""\"""#)]
    #[case(r#""\\""#)]
    #[case(r#""\/_""#)]
    #[case(r#""_\b\f\n\r\t_""#)]
    #[case(r#""£""#)]
    #[case(r#""€_""#)]
    #[case(r#""_🍣""#)]
    #[case("0")]
    #[case("19")]
    #[case("-0")]
    #[case("-1")]
    #[case("0.55")]
    #[case("0e-1")]
    #[case("0E-1")]
    #[case("0e+1")]
    #[case("0e-12")]
    #[case("true")]
    #[case("false")]
    #[case("null")]
    #[case("{}")]
    #[case(r#"{"K":"V"}"#)]
    #[case(r#"{"K":{"K1":"V1","K2":"V2"}}"#)]
    #[case("[]")]
    #[case("[[1,2]]")]
    #[case("[[[1]]]")]
    fn single_value_is_captured_exactly(#[case] value: &str) {
        let input = [r#"{"":"#, value, "}"].concat();
        let calls = record_object(&input).unwrap();
        assert_eq!(calls, [(&br#""""#[..], value.as_bytes())]);
    }

    #[rstest]
    #[case("", ErrorKind::UnexpectedEndOfInput)]
    #[case("   ", ErrorKind::UnexpectedEndOfInput)]
    #[case("[]", ErrorKind::UnexpectedTokenKind(TokenKind::OpenArray))]
    #[case(r#""not an object""#, ErrorKind::UnexpectedTokenKind(TokenKind::String))]
    #[case("x", ErrorKind::UnexpectedStartOfToken(b'x'))]
    #[case(r#"{"a":1"#, ErrorKind::UnexpectedEndOfInput)]
    #[case(r#"{"a",1}"#, ErrorKind::UnexpectedTokenKind(TokenKind::Comma))]
    fn malformed_objects(#[case] input: &str, #[case] expected: ErrorKind) {
        let err = record_object(input).unwrap_err();
        assert_eq!(err.syntax().map(Error::kind), Some(expected));
    }

    #[test]
    fn callback_sees_members_before_failure() {
        let mut seen = Vec::new();
        let err = walk_object(br#"{"a":1,"b":2,"c":3}"#, |key, _| {
            seen.push(key);
            if key == br#""b""# { Err("enough") } else { Ok(()) }
        })
        .unwrap_err();
        assert_eq!(err, WalkError::CallbackFailed("enough"));
        assert_eq!(seen, [&br#""a""#[..], &br#""b""#[..]]);
    }

    #[test]
    fn array_elements() {
        let mut calls = Vec::new();
        walk_array(br#" ["a", 2, {"c": []}] "#, |index, value| {
            calls.push((index, value));
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(
            calls,
            [
                (0, &br#""a""#[..]),
                (1, &b"2"[..]),
                (2, &br#"{"c": []}"#[..]),
            ]
        );
    }

    #[test]
    fn array_walk_rejects_object() {
        let err = walk_array(b"{}", |_, _| Ok::<(), ()>(())).unwrap_err();
        assert_eq!(
            err.syntax().map(Error::kind),
            Some(ErrorKind::UnexpectedTokenKind(TokenKind::OpenObject))
        );
    }
}
