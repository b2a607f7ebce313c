//! Field deserializers for the loose scalar shapes models emit: years and
//! grades as numbers, booleans as strings, `null` where a value was expected.

use serde::de::{Deserializer, Error, Unexpected};
use serde::Deserialize;
use serde_json::Value;

use crate::cv::model::EntryId;

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Scalars as text, `null` as nothing. Arrays and objects are handed back.
fn scalar_text(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(other),
    }
}

fn texts(value: Value) -> Result<Vec<String>, Value> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| scalar_text(item).transpose())
            .collect(),
        other => Err(other),
    }
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
        .map(Option::unwrap_or_default)
        .map_err(|other| D::Error::invalid_type(unexpected(&other), &"a string"))
}

pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
        .map_err(|other| D::Error::invalid_type(unexpected(&other), &"a string"))
}

/// `null` items are skipped.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    texts(Value::deserialize(deserializer)?)
        .map_err(|other| D::Error::invalid_type(unexpected(&other), &"a list of strings"))
}

pub fn opt_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => texts(value)
            .map(Some)
            .map_err(|other| D::Error::invalid_type(unexpected(&other), &"a list of strings")),
    }
}

/// Accepts `"true"`/`"false"` (and yes/no, 1/0) as well as real booleans.
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            _ => Err(D::Error::invalid_value(unexpected(&value), &"a boolean")),
        },
        _ => Err(D::Error::invalid_type(unexpected(&value), &"a boolean")),
    }
}

/// Ids from a model may arrive as strings; anything unusable becomes 0 and
/// gets a fresh id from the store.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<EntryId, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as EntryId))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(string(json!(2019)).unwrap(), "2019");
        assert_eq!(string(json!(3.8)).unwrap(), "3.8");
        assert_eq!(string(json!(true)).unwrap(), "true");
        assert_eq!(string(Value::Null).unwrap(), "");
        assert!(string(json!({"year": 2019})).is_err());
    }

    #[test]
    fn test_list_skips_nulls() {
        assert_eq!(
            string_list(json!(["Rust", null, 3])).unwrap(),
            vec!["Rust".to_string(), "3".to_string()]
        );
        assert!(string_list(json!("Rust")).is_err());
        assert!(string_list(json!([["nested"]])).is_err());
        assert_eq!(opt_string_list(Value::Null).unwrap(), None);
    }

    #[test]
    fn test_boolean_strings() {
        assert!(boolean(json!("true")).unwrap());
        assert!(boolean(json!(" Yes ")).unwrap());
        assert!(!boolean(json!("false")).unwrap());
        assert!(!boolean(json!(0)).unwrap());
        assert!(boolean(json!("sometimes")).is_err());
    }

    #[test]
    fn test_id_coercion() {
        assert_eq!(id(json!("17")).unwrap(), 17);
        assert_eq!(id(json!(42)).unwrap(), 42);
        assert_eq!(id(json!("abc")).unwrap(), 0);
    }
}
