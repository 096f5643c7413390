//! JSON <-> Value conversion

use std::str::FromStr;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::*;
use crate::number::Number;
use crate::types::Value;
use crate::write::NativeMode;

/// Classify untyped JSON data into a Value.
///
/// Booleans are matched before numbers so that `true` never becomes `1`.
pub fn from_json(json: &JsonValue) -> Value {
    match json {
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        JsonValue::Number(n) => Value::Number(Number::from(n)),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(arr) => Value::Array(arr.iter().map(from_json).collect()),
        JsonValue::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect(),
        ),
    }
}

/// Project a Value back into untyped JSON data
pub fn to_json(v: &Value) -> JsonValue {
    match v {
        Value::Null | Value::Sentinel(_) => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => n.to_json().map(JsonValue::Number).unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(items) => JsonValue::Array(items.iter().map(to_json).collect()),
        Value::Object(map) => {
            let mut obj = JsonMap::new();
            for (key, value) in map {
                obj.insert(key.clone(), to_json(value));
            }
            JsonValue::Object(obj)
        }
    }
}

/// Parse JSON text into a Value
pub fn parse_json(json_str: &str) -> Result<Value> {
    let json: JsonValue = serde_json::from_str(json_str)?;
    Ok(from_json(&json))
}

/// Stringify a Value as compact JSON
pub fn stringify_json(v: &Value) -> Result<String> {
    to_text(v, NativeMode::Compact)
}

/// Stringify a Value as pretty JSON
pub fn stringify_json_pretty(v: &Value) -> Result<String> {
    to_text(v, NativeMode::Pretty)
}

fn to_text(v: &Value, mode: NativeMode) -> Result<String> {
    let bytes = v.to_vec(mode)?;
    String::from_utf8(bytes).map_err(|_| ErrorKind::InvalidDocument.into())
}

impl Value {
    /// Parse JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Value> {
        let json: JsonValue = serde_json::from_slice(bytes)?;
        Ok(from_json(&json))
    }

    /// Parse JSON text
    pub fn parse(text: &str) -> Result<Value> {
        parse_json(text)
    }

    /// Parse JSON text, yielding an [`ErrorKind::InvalidDocument`] sentinel
    /// when it is malformed
    pub fn parse_lossy(text: &str) -> Value {
        parse_json(text).unwrap_or(Value::Sentinel(ErrorKind::InvalidDocument))
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Value> {
        parse_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;
    use serde_json::json;

    #[test]
    fn test_from_json_null() {
        let v = from_json(&json!(null));
        assert!(v.is_null());
        assert!(v.exists());
    }

    #[test]
    fn test_from_json_bool() {
        let v = from_json(&json!(true));
        assert_eq!(v.as_bool(), Some(true));
        assert_eq!(v.tag(), Tag::Bool);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(from_json(&json!(42)).as_i64(), Some(42));
        assert_eq!(from_json(&json!(3.5)).as_f64(), Some(3.5));
        assert_eq!(from_json(&json!(u64::MAX)).as_u64(), Some(u64::MAX));
    }

    #[test]
    fn test_from_json_string() {
        assert_eq!(from_json(&json!("hello")).as_str(), Some("hello"));
    }

    #[test]
    fn test_from_json_containers() {
        let v = from_json(&json!({"a": [1, 2, 3], "b": {}}));
        assert!(v.is_object());
        assert_eq!(v["a"].len(), 3);
        assert!(v["b"].is_object());
    }

    #[test]
    fn test_roundtrip() {
        let original = json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "scores": [95, 87.5, 92],
            "manager": null
        });

        let v = from_json(&original);
        assert_eq!(to_json(&v), original);
    }

    #[test]
    fn test_parse() {
        let v = Value::parse(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(v.to_json(), json!({"a": [1, 2]}));

        let v: Value = "[true]".parse().unwrap();
        assert_eq!(v[0].as_bool(), Some(true));

        let v = Value::from_slice(br#""text""#).unwrap();
        assert_eq!(v.as_str(), Some("text"));
    }

    #[test]
    fn test_parse_errors() {
        let err = Value::parse("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDocument);

        let v = Value::parse_lossy("{not json");
        assert!(!v.exists());
        assert_eq!(v.error(), Some(ErrorKind::InvalidDocument));
        assert!(v.is_null());
    }

    #[test]
    fn test_stringify() {
        let v = from_json(&json!({"b": 1, "a": [true, null]}));
        assert_eq!(stringify_json(&v).unwrap(), r#"{"a":[true,null],"b":1}"#);
        assert!(stringify_json_pretty(&v).unwrap().contains("\n  \"a\": ["));
    }
}
