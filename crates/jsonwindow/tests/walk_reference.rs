#![expect(missing_docs)]

use std::collections::BTreeMap;

use jsonwindow::{Window, decode_string_token, walk_object};
use serde_json::{Value, value::RawValue};

const REFERENCE: &str =
    r#"{"A":"V","B":{},"C":{"K":"V"},"D":{"1":1,"2":2},"E":[],"F":[1],"G":[1,2]}"#;

const WHITESPACE: [&str; 4] = [" ", "\t", "\n", "\r\n"];

/// Decoded key and raw value of each member, in input order.
type Members = Vec<(String, String)>;

fn walk(input: &str) -> Option<Members> {
    let mut members = Members::new();
    walk_object(input.as_bytes(), |key, value| {
        let key = decode_string_token(key).map_err(|_| "undecodable key")?;
        let key = String::from_utf8(key.into_owned()).map_err(|_| "key is not UTF-8")?;
        let value = std::str::from_utf8(value).map_err(|_| "value is not UTF-8")?;
        members.push((key, value.to_owned()));
        Ok::<(), &str>(())
    })
    .ok()?;
    Some(members)
}

/// `serde_json`'s view of the same members. Key order comes from a
/// `preserve_order` object, raw values from `RawValue`.
fn reference(input: &str) -> Option<Members> {
    let Value::Object(ordered) = serde_json::from_str::<Value>(input).ok()? else {
        return None;
    };
    let mut raw: BTreeMap<String, Box<RawValue>> = serde_json::from_str(input).ok()?;
    ordered
        .keys()
        .map(|key| Some((key.clone(), raw.remove(key)?.get().to_owned())))
        .collect()
}

#[test]
fn reference_object_walks_like_serde_json() {
    let members = walk(REFERENCE).unwrap();
    assert_eq!(Some(&members), reference(REFERENCE).as_ref());
    let keys: Vec<&str> = members.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["A", "B", "C", "D", "E", "F", "G"]);
    assert_eq!(members[3].1, r#"{"1":1,"2":2}"#);
    assert_eq!(members[6].1, "[1,2]");
}

#[test]
fn whitespace_at_every_index() {
    for ws in WHITESPACE {
        for index in 0..=REFERENCE.len() {
            let input = [&REFERENCE[..index], ws, &REFERENCE[index..]].concat();
            assert_eq!(walk(&input), reference(&input), "input: {input:?}");
        }
    }
}

#[test]
fn every_value_reads_back_from_a_window() {
    let members = walk(REFERENCE).unwrap();
    for (key, raw) in &members {
        let mut window = Window::new(raw.as_bytes());
        let value = window.next_value().unwrap();
        assert_eq!(value.raw(), raw.as_bytes(), "key: {key}");
        assert!(window.is_at_end());
    }
}

#[test]
fn members_keep_input_order() {
    let input = r#"{"z": 1, "a": [2], "m": {"k": 3}}"#;
    let members = walk(input).unwrap();
    assert_eq!(
        members,
        [
            ("z".to_owned(), "1".to_owned()),
            ("a".to_owned(), "[2]".to_owned()),
            ("m".to_owned(), r#"{"k": 3}"#.to_owned()),
        ]
    );
    assert_eq!(Some(members), reference(input));
}

#[test]
fn bytes_after_the_object_are_not_examined() {
    let input = format!("{REFERENCE} trailing garbage {{");
    assert!(reference(&input).is_none());
    assert_eq!(walk(&input), reference(REFERENCE));
}
