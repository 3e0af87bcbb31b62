//! Typed field values.
//!
//! Raw study descriptions carry loosely typed JSON. Every field of a
//! normalized record is one of the variants below, and [`Value::to_text`]
//! is the only place where a value is turned into text for matching,
//! ordering, grouping and export.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Largest integer that round-trips exactly through an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The value of one field in a normalized record.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Number(f64),
    /// Ordered sequence of strings (model lists, task types, ...).
    List(Vec<String>),
    /// Small structured mapping, usually an `answer`/`details` pair.
    Structured(Map<String, JsonValue>),
}

impl Value {
    /// Coerce a raw JSON value.
    ///
    /// Non-finite numbers become [`Value::Null`], booleans become text, and
    /// list items are stringified (nulls dropped, nested containers rendered
    /// as compact JSON).
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(flag) => Self::Text(flag.to_string()),
            JsonValue::Number(number) => number
                .as_f64()
                .filter(|n| n.is_finite())
                .map_or(Self::Null, Self::Number),
            JsonValue::String(text) => Self::Text(text.clone()),
            JsonValue::Array(items) => Self::List(items.iter().filter_map(list_item_text).collect()),
            JsonValue::Object(map) => Self::Structured(map.clone()),
        }
    }

    /// Convert back to JSON. Integral numbers are emitted without a fraction.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Text(text) => JsonValue::String(text.clone()),
            Self::Number(number) => number_to_json(*number),
            Self::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
            Self::Structured(map) => JsonValue::Object(map.clone()),
        }
    }

    /// Build a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for null values and values whose text form is empty.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Number(_) | Self::Structured(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The `answer` member of a structured value.
    pub fn answer(&self) -> Option<String> {
        self.structured_member("answer")
    }

    /// The `details` member of a structured value.
    pub fn details(&self) -> Option<String> {
        self.structured_member("details")
    }

    /// True when the value is a structured `answer`/`details` pair.
    pub fn is_answer_pair(&self) -> bool {
        match self {
            Self::Structured(map) => map.contains_key("answer") || map.contains_key("details"),
            _ => false,
        }
    }

    fn structured_member(&self, key: &str) -> Option<String> {
        let Self::Structured(map) = self else {
            return None;
        };
        match map.get(key)? {
            JsonValue::Null => None,
            JsonValue::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Plain-text rendering of the value.
    ///
    /// Null is empty, numbers use their shortest decimal form (integral
    /// values without a fraction), lists are joined with `,` and structured
    /// values are compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::List(items) => items.join(","),
            Self::Structured(map) => JsonValue::Object(map.clone()).to_string(),
        }
    }

    /// Case-insensitive substring test against [`Value::to_text`].
    ///
    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        if self.is_null() {
            return false;
        }
        self.to_text().to_lowercase().contains(needle)
    }
}

/// Format a number the way it is displayed everywhere in the browser.
pub fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

fn number_to_json(number: f64) -> JsonValue {
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        JsonValue::from(number as i64)
    } else {
        serde_json::Number::from_f64(number).map_or(JsonValue::Null, JsonValue::Number)
    }
}

fn list_item_text(item: &JsonValue) -> Option<String> {
    match item {
        JsonValue::Null => None,
        JsonValue::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        if number.is_finite() {
            Self::Number(number)
        } else {
            Self::Null
        }
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(Self::from_json(&json))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_json_shapes() {
        assert_eq!(Value::from_json(&json!(null)), Value::Null);
        assert_eq!(Value::from_json(&json!("x")), Value::Text("x".into()));
        assert_eq!(Value::from_json(&json!(12)), Value::Number(12.0));
        assert_eq!(Value::from_json(&json!(true)), Value::Text("true".into()));
        assert_eq!(
            Value::from_json(&json!(["a", 1, null, ["b"]])),
            Value::list(["a", "1", "[\"b\"]"])
        );
        assert!(matches!(
            Value::from_json(&json!({"answer": "Yes"})),
            Value::Structured(_)
        ));
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(f64::INFINITY), Value::Null);
    }

    #[test]
    fn text_rendering() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Number(2019.0).to_text(), "2019");
        assert_eq!(Value::Number(0.25).to_text(), "0.25");
        assert_eq!(Value::list(["GPT-4", "Claude"]).to_text(), "GPT-4,Claude");
        let structured = Value::from_json(&json!({"answer": "Yes", "details": "n=3"}));
        assert_eq!(structured.to_text(), r#"{"answer":"Yes","details":"n=3"}"#);
    }

    #[test]
    fn structured_text_keeps_source_key_order() {
        let source = r#"{"details":"n=3","answer":"Yes"}"#;
        let json: JsonValue = serde_json::from_str(source).unwrap();
        let value = Value::from_json(&json);
        assert_eq!(value.to_text(), source);
        assert_eq!(value.to_json().to_string(), source);
    }

    #[test]
    fn answer_and_details_members() {
        let value = Value::from_json(&json!({"answer": "No", "details": null}));
        assert!(value.is_answer_pair());
        assert_eq!(value.answer().as_deref(), Some("No"));
        assert_eq!(value.details(), None);
        assert_eq!(Value::from("No").answer(), None);
    }

    #[test]
    fn serializes_integral_numbers_without_fraction() {
        let json = serde_json::to_string(&Value::Number(2019.0)).unwrap();
        assert_eq!(json, "2019");
        let back: Value = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(back, Value::list(["a", "b"]));
    }

    #[test]
    fn blank_values() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(Value::List(vec![]).is_blank());
        assert!(!Value::Number(0.0).is_blank());
    }
}
