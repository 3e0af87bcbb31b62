//! Normalized study records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::names;
use crate::value::Value;

/// A flat, sparse mapping from field name to [`Value`].
///
/// Fields keep the order in which they were inserted; schema inference
/// relies on that order to break frequency ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    fields: IndexMap<String, Value>,
}

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Text form of a field; missing and null fields are empty.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(Value::to_text).unwrap_or_default()
    }

    /// The record title when present and non-blank.
    pub fn title(&self) -> Option<String> {
        self.get(names::TITLE)
            .filter(|value| !value.is_blank())
            .map(Value::to_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON object view of the record.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for NormalizedRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }
}
