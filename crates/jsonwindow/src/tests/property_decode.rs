use alloc::{borrow::Cow, format, string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{Token, TokenKind, decode_string_token};

/// Encodes every character as `\uXXXX`, surrogate pairs included.
fn escape_all(s: &str) -> String {
    let mut out = String::from("\"");
    for unit in s.encode_utf16() {
        out.push_str(&format!("\\u{unit:04x}"));
    }
    out.push('"');
    out
}

/// Property: a string serialized by `serde_json` scans as one string token and
/// decodes back to the original text.
#[test]
fn decode_matches_serde_json_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(s: String) -> bool {
        let Ok(encoded) = serde_json::to_string(&s) else {
            return false;
        };
        let Ok(token) = Token::scan(encoded.as_bytes(), 0) else {
            return false;
        };
        let borrowed = !encoded.contains('\\');
        token.kind() == TokenKind::String
            && token.raw() == encoded.as_bytes()
            && match decode_string_token(token.raw()) {
                Ok(Cow::Borrowed(decoded)) => borrowed && decoded == s.as_bytes(),
                Ok(Cow::Owned(decoded)) => !borrowed && decoded == s.as_bytes(),
                Err(_) => false,
            }
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: escaping every UTF-16 code unit round-trips through the decoder.
#[test]
fn decode_unicode_escapes_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(s: String) -> bool {
        let encoded = escape_all(&s);
        Token::scan(encoded.as_bytes(), 0).is_ok_and(|token| token.raw() == encoded.as_bytes())
            && decode_string_token(encoded.as_bytes())
                .is_ok_and(|decoded| decoded == s.as_bytes())
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn decode_agrees_with_serde_json_on_escapes() {
    let inputs: Vec<&str> = Vec::from([
        r#""""#,
        r#""\"""#,
        r#""\\""#,
        r#""\/_""#,
        r#""_\b\f\n\r\t_""#,
        r#""\u0000""#,
        r#""éé""#,
        r#""🍣""#,
        r#""mixed ሴ ሴ text""#,
    ]);
    for input in inputs {
        let expected: String = serde_json::from_str(input).unwrap();
        let decoded = decode_string_token(input.as_bytes()).unwrap();
        assert_eq!(decoded, expected.as_bytes(), "input: {input}");
    }
}
