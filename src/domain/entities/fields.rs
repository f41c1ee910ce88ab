//! Tolerant field readers over untyped JSON objects.
//!
//! A key is only taken out of the object when its value has the expected
//! type and converts without loss. Anything else stays in the object, so it
//! ends up in the primitive's `extra` map and is written back verbatim.

use serde_json::{Map, Value};

use crate::domain::value_objects::Rgb;

/// Remove `key` only if `convert` accepts its value
fn take_with<T>(
    object: &mut Map<String, Value>,
    key: &str,
    convert: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let converted = object.get(key).and_then(convert)?;
    object.shift_remove(key);
    Some(converted)
}

pub(super) fn take_i64(object: &mut Map<String, Value>, key: &str) -> Option<i64> {
    take_with(object, key, Value::as_i64)
}

pub(super) fn take_f64(object: &mut Map<String, Value>, key: &str) -> Option<f64> {
    take_with(object, key, |value| value.as_f64().filter(|f| f.is_finite()))
}

pub(super) fn take_bool(object: &mut Map<String, Value>, key: &str) -> Option<bool> {
    take_with(object, key, Value::as_bool)
}

/// Packed colour that fits in 24 bits
pub(super) fn take_color(object: &mut Map<String, Value>, key: &str) -> Option<Rgb> {
    take_with(object, key, |value| {
        value
            .as_u64()
            .and_then(|packed| u32::try_from(packed).ok())
            .filter(|packed| *packed <= 0x00FF_FFFF)
            .map(Rgb::from_packed)
    })
}

pub(super) fn take_string(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(object.get(key), Some(Value::String(_))) {
        return None;
    }
    match object.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

pub(super) fn take_array(object: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    if !matches!(object.get(key), Some(Value::Array(_))) {
        return Vec::new();
    }
    match object.shift_remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

pub(super) fn take_object(object: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    if !matches!(object.get(key), Some(Value::Object(_))) {
        return Map::new();
    }
    match object.shift_remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Name of a JSON value's type, for error messages
pub(super) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_mismatched_types_stay_in_object() {
        let mut map = object(json!({"x": 10.5, "name": 3, "type": null, "flag": "yes"}));

        assert_eq!(take_i64(&mut map, "x"), None);
        assert_eq!(take_string(&mut map, "name"), None);
        assert_eq!(take_string(&mut map, "type"), None);
        assert_eq!(take_bool(&mut map, "flag"), None);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_matching_types_are_taken() {
        let mut map = object(json!({"x": 10, "z": 2.5, "name": "lamp", "on": true}));

        assert_eq!(take_i64(&mut map, "x"), Some(10));
        assert_eq!(take_f64(&mut map, "z"), Some(2.5));
        assert_eq!(take_string(&mut map, "name"), Some("lamp".to_string()));
        assert_eq!(take_bool(&mut map, "on"), Some(true));
        assert!(map.is_empty());
    }

    #[test]
    fn test_color_must_fit_24_bits() {
        let mut map = object(json!({"wide": 4279383126u64, "neg": -1, "ok": 0x123456}));

        assert_eq!(take_color(&mut map, "wide"), None);
        assert_eq!(take_color(&mut map, "neg"), None);
        assert_eq!(take_color(&mut map, "ok"), Some(Rgb::from_packed(0x123456)));
        assert_eq!(map.get("wide"), Some(&json!(4279383126u64)));
    }

    #[test]
    fn test_integral_float_is_not_an_integer() {
        let mut map: Map<String, Value> =
            serde_json::from_str(r#"{"x": 10.0}"#).unwrap();
        assert_eq!(take_i64(&mut map, "x"), None);
        assert_eq!(map["x"].to_string(), "10.0");
    }
}
