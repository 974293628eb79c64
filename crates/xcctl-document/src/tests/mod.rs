//! Unit tests for `xcctl_document`.

mod label_changes_tests;


use crate::{Map, Value};

/// Decodes a JSON or YAML fixture.
pub(super) fn doc(text: &str) -> Value {
    Value::parse_text(text).expect("fixture should decode")
}

/// Decodes a fixture that must be an object.
pub(super) fn object(text: &str) -> Map {
    match doc(text) {
        Value::Object(map) => map,
        other => panic!("fixture should be an object, got {}", other.kind()),
    }
}
