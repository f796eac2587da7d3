#![no_main]

use arbitrary::Arbitrary;
use jsonwindow::{
    DecodeError, Window, WindowOptions, decode_string_token, tokenize, walk_object,
};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

/// Deeper than `serde_json` will go, shallow enough to keep the stack.
const OPTIONS: WindowOptions = WindowOptions {
    max_depth: Some(256),
};

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

#[derive(Debug, Arbitrary)]
enum Input {
    /// Arbitrary bytes: nothing may panic, and the scanner must agree with
    /// `serde_json` on which objects are well formed.
    Bytes(Vec<u8>),
    /// A generated document re-serialized with whitespace between tokens.
    Document {
        value: ArbitraryValue,
        whitespace: Vec<u8>,
    },
}

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn check_bytes(data: &[u8]) {
    for token in tokenize(data) {
        let Ok(token) = token else { break };
        if token.raw().first() == Some(&b'"') {
            let _ = decode_string_token(token.raw());
        }
    }

    let mut window = Window::with_options(data, OPTIONS);
    while window.next_value().is_ok() {}

    let walked = Window::with_options(data, OPTIONS).next_object(|_, _| Ok::<(), ()>(()));
    if let Ok(Value::Object(_)) = serde_json::from_slice::<Value>(data) {
        assert!(walked.is_ok(), "serde_json accepted an object the walker rejected");
    }
}

fn check_document(value: &Value, whitespace: &[u8]) {
    let Ok(compact) = serde_json::to_vec(value) else {
        return;
    };
    let mut padded = Vec::with_capacity(compact.len() * 2);
    let mut ws = whitespace.iter().cycle();
    for token in tokenize(&compact) {
        let token = token.expect("serde_json output tokenizes");
        if let Some(&b) = ws.next() {
            padded.extend_from_slice(WS_TABLE[usize::from(b) % WS_TABLE.len()]);
        }
        padded.extend_from_slice(token.raw());
    }

    let mut window = Window::new(&padded);
    let read = window.next_value().expect("padded document reads as one value");
    assert!(window.is_at_end());
    let stripped: Vec<u8> = tokenize(read.raw())
        .flat_map(|token| token.expect("value span tokenizes").raw())
        .copied()
        .collect();
    assert_eq!(stripped, compact);

    if let Value::Object(map) = value {
        let mut keys = Vec::new();
        walk_object(&padded, |key, _| {
            keys.push(decode_string_token(key).map(|k| k.into_owned()));
            Ok::<(), ()>(())
        })
        .expect("padded object walks");
        let expected: Vec<Result<Vec<u8>, DecodeError>> =
            map.keys().map(|k| Ok(k.as_bytes().to_vec())).collect();
        assert_eq!(keys, expected);
    }
}

fuzz_target!(|input: Input| match input {
    Input::Bytes(data) => check_bytes(&data),
    Input::Document { value, whitespace } => check_document(&value.0, &whitespace),
});
