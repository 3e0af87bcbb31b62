//! Specialty extraction from `processed_data.specialties`.
//!
//! Items are either a bare specialty string or a `[specialty, subspecialty]`
//! pair. Both sets are deduplicated and sorted.

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtySets {
    pub specialties: BTreeSet<String>,
    pub subspecialties: BTreeSet<String>,
}

pub fn collect_specialties(items: &[JsonValue]) -> SpecialtySets {
    let mut sets = SpecialtySets::default();
    for item in items {
        match item {
            JsonValue::Array(pair) => {
                if let Some(specialty) = pair.first().and_then(member_text) {
                    sets.specialties.insert(specialty);
                }
                if let Some(subspecialty) = pair.get(1).and_then(member_text) {
                    sets.subspecialties.insert(subspecialty);
                }
            }
            JsonValue::String(specialty) if !specialty.is_empty() => {
                sets.specialties.insert(specialty.clone());
            }
            _ => {}
        }
    }
    sets
}

/// Text of a non-empty pair member.
fn member_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) if !text.is_empty() => Some(text.clone()),
        JsonValue::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}
