//! Schema inference over a normalized record batch.
//!
//! Fields are ordered by how many records carry them (descending); ties
//! keep first-seen order. Each field gets a value kind, a default
//! visibility and the hidden-everywhere flag.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, info_span};

use study_model::{Field, FieldKind, NormalizedRecord, Schema, Value, names};

/// Fields shown by default in a fresh view.
pub const HEADLINE_FIELDS: [&str; 10] = [
    "DOI",
    "Title",
    "Abstract",
    "Specialty",
    "Subspecialty",
    "Sample Size",
    "LLM Outperformed Human?",
    "Model Categories",
    "Evaluation Types",
    "Year",
];

/// Fields offered for grouping, in menu order.
pub const GROUP_BY_CANDIDATES: [&str; 6] = [
    "Year",
    "Specialty",
    "Task Types",
    "Evaluation Types",
    "Model Categories",
    "Region",
];

/// Share of number-like values above which a field is numeric.
const NUMERIC_THRESHOLD: f64 = 0.8;

/// Weight of a text value that parses as a number.
const NUMERIC_TEXT_WEIGHT: f64 = 0.2;

/// Infer the schema of a record batch.
///
/// `Title` is always part of the schema, even when no record carries it.
pub fn infer_schema(records: &[NormalizedRecord]) -> Schema {
    let span = info_span!("schema", record_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for name in record.fields() {
            match positions.get(name).copied() {
                Some(position) => order[position].1 += 1,
                None => {
                    positions.insert(name, order.len());
                    order.push((name, 1));
                }
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    if !positions.contains_key(names::TITLE) {
        debug!("no record carries a title field");
        order.push((names::TITLE, 0));
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|(name, frequency)| Field {
            name: name.to_string(),
            kind: infer_kind(records.iter().filter_map(|record| record.get(name))),
            frequency,
            visible_by_default: HEADLINE_FIELDS.contains(&name),
            hidden_everywhere: is_hidden_everywhere(name),
        })
        .collect();

    let schema = Schema::new(fields);
    info!(
        field_count = schema.len(),
        hidden_count = schema.hidden_everywhere().len(),
        duration_ms = start.elapsed().as_millis(),
        "schema inference complete"
    );
    schema
}

/// Internal or derived fields kept out of listings, filters and search.
pub fn is_hidden_everywhere(name: &str) -> bool {
    name.eq_ignore_ascii_case(names::INDEX) || name.contains(names::EXTRACTED_MARKER)
}

/// Kind of a field from the values it takes. Nulls are ignored.
pub fn infer_kind<'a>(values: impl IntoIterator<Item = &'a Value>) -> FieldKind {
    let values: Vec<&Value> = values.into_iter().filter(|value| !value.is_null()).collect();
    if values.is_empty() {
        return FieldKind::String;
    }
    if values.iter().any(|value| matches!(value, Value::List(_))) {
        return FieldKind::List;
    }
    if values.iter().any(|value| matches!(value, Value::Structured(_))) {
        return FieldKind::Structured;
    }
    let number_like: f64 = values
        .iter()
        .map(|value| match value {
            Value::Number(_) => 1.0,
            Value::Text(text) if parse_numeric_text(text).is_some() => NUMERIC_TEXT_WEIGHT,
            _ => 0.0,
        })
        .sum();
    if number_like / values.len() as f64 > NUMERIC_THRESHOLD {
        FieldKind::Number
    } else {
        FieldKind::String
    }
}

/// Parse text with the browser's numeric conversion rules.
///
/// Surrounding whitespace is ignored and blank text is zero. Decimal
/// literals with an optional sign and exponent, `Infinity` with an optional
/// sign, and unsigned `0x`/`0o`/`0b` integers are accepted.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(number) = parse_radix_literal(trimmed) {
        return Some(number);
    }
    let decimal_chars = trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars || !trimmed.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let (prefix, digits) = text.split_at_checked(2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Group-by candidates present among the listed fields.
pub fn group_by_candidates(schema: &Schema) -> Vec<&'static str> {
    GROUP_BY_CANDIDATES
        .into_iter()
        .filter(|name| schema.position(name).is_some())
        .collect()
}
