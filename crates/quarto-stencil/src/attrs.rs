/*
 * attrs.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Attribute-string serialization.
//!
//! Builds the canonical escaped attribute fragment used by generated markup
//! code: a leading space followed by space-joined, key-sorted
//! `key="value"` or bare-`key` pairs, or the empty string when nothing
//! qualifies.

use serde_json::{Map, Value};

/// Serialize a key/value mapping into an attribute string.
///
/// `base` supplies defaults and is merged first; keys in `values` win on
/// collision. Key transform: one trailing `_` is stripped, `__` becomes the
/// namespace separator `:`, remaining `_` become `-`.
///
/// Value policy: keys starting with `_` are always skipped; null, `false`,
/// and empty strings/arrays/objects are skipped, but numeric zero is kept;
/// `true` produces a bare key; arrays are space-joined; everything else is
/// stringified and attribute-escaped.
pub fn attrs(values: &Map<String, Value>, base: Option<&Map<String, Value>>) -> String {
    let mut merged: Map<String, Value> = base.cloned().unwrap_or_default();
    for (key, value) in values {
        merged.insert(key.clone(), value.clone());
    }

    let mut keys: Vec<&String> = merged.keys().collect();
    keys.sort();

    let mut parts: Vec<String> = Vec::new();
    for key in keys {
        if key.starts_with('_') {
            continue;
        }

        let name = transform_key(key);
        match &merged[key] {
            Value::Null | Value::Bool(false) => continue,
            Value::String(s) if s.is_empty() => continue,
            Value::Array(items) if items.is_empty() => continue,
            Value::Object(map) if map.is_empty() => continue,
            Value::Bool(true) => parts.push(name),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(render_scalar)
                    .collect::<Vec<_>>()
                    .join(" ");
                parts.push(format!("{}={}", name, quote_attribute(&joined)));
            }
            other => parts.push(format!("{}={}", name, quote_attribute(&render_scalar(other)))),
        }
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" {}", parts.join(" "))
    }
}

fn transform_key(key: &str) -> String {
    let key = key.strip_suffix('_').unwrap_or(key);
    key.replace("__", ":").replace('_', "-")
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Escape and double-quote an attribute value.
pub fn quote_attribute(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '&' => quoted.push_str("&amp;"),
            '<' => quoted.push_str("&lt;"),
            '>' => quoted.push_str("&gt;"),
            '"' => quoted.push_str("&quot;"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_sorted_and_transformed_keys() {
        let values = map(json!({"foo": "bar", "data_baz": "42"}));
        assert_eq!(attrs(&values, None), r#" data-baz="42" foo="bar""#);
    }

    #[test]
    fn test_true_is_bare_key() {
        let values = map(json!({"checked": true}));
        assert_eq!(attrs(&values, None), " checked");
    }

    #[test]
    fn test_zero_is_kept() {
        let values = map(json!({"value": 0}));
        assert_eq!(attrs(&values, None), r#" value="0""#);
    }

    #[test]
    fn test_falsy_values_skipped() {
        let values = map(json!({"a": false, "b": null, "c": "", "d": []}));
        assert_eq!(attrs(&values, None), "");
    }

    #[test]
    fn test_array_joined_and_trailing_underscore_stripped() {
        let values = map(json!({"class_": ["a", "b"]}));
        assert_eq!(attrs(&values, None), r#" class="a b""#);
    }

    #[test]
    fn test_namespace_separator() {
        let values = map(json!({"xml__lang": "en"}));
        assert_eq!(attrs(&values, None), r#" xml:lang="en""#);
    }

    #[test]
    fn test_underscore_prefixed_keys_skipped() {
        let values = map(json!({"_private": "x", "shown": "y"}));
        assert_eq!(attrs(&values, None), r#" shown="y""#);
    }

    #[test]
    fn test_base_merged_with_caller_winning() {
        let base = map(json!({"id": "default", "role": "note"}));
        let values = map(json!({"id": "override"}));
        assert_eq!(attrs(&values, Some(&base)), r#" id="override" role="note""#);
    }

    #[test]
    fn test_values_are_escaped() {
        let values = map(json!({"title": "a<b & \"c\""}));
        assert_eq!(attrs(&values, None), r#" title="a&lt;b &amp; &quot;c&quot;""#);
    }
}
