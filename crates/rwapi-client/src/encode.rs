//! Query-string encoding of structured payloads
//!
//! Nested values use bracket notation: `{"fields": {"include": ["title"]}}`
//! becomes `fields[include][0]=title`. Booleans are sent as `1`/`0`, nulls
//! and empty containers are skipped.

use serde_json::Value;

/// Flatten a payload into ordered key/value pairs
pub(crate) fn form_pairs(payload: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    match payload {
        Value::Object(map) => {
            for (key, value) in map {
                push_pairs(key.clone(), value, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                push_pairs(index.to_string(), value, &mut pairs);
            }
        }
        _ => {}
    }
    pairs
}

fn push_pairs(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
        Value::Number(number) => pairs.push((key, number.to_string())),
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                push_pairs(format!("{key}[{name}]"), item, pairs);
            }
        }
    }
}
