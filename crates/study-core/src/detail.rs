//! Detail view of a single record.

use std::cmp::Ordering;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value as JsonValue;

use study_model::{NormalizedRecord, Schema, Value, names};

/// Title used when a record has none.
pub const FALLBACK_TITLE: &str = "Study Details";

/// Fields never shown in the detail view.
pub const DETAIL_EXCLUDED_FIELDS: [&str; 1] = ["Include?"];

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Visual tone of a yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerTone {
    Yes,
    No,
    Neutral,
}

impl AnswerTone {
    pub fn from_answer(answer: &str) -> Self {
        match answer.to_lowercase().as_str() {
            "yes" => Self::Yes,
            "no" => Self::No,
            _ => Self::Neutral,
        }
    }
}

/// Presentation form of one field value.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Empty,
    Text(String),
    Link {
        text: String,
        url: String,
    },
    /// Non-blank list items.
    Chips(Vec<String>),
    Answer {
        answer: String,
        tone: AnswerTone,
        details: Option<String>,
    },
    /// Structured value without an answer/details pair.
    Entries(Vec<(String, String)>),
}

impl DetailValue {
    pub fn render(field: &str, value: &Value) -> Self {
        if let Some(url) = identifier_link(field, value) {
            return Self::Link {
                text: value.to_text().trim().to_string(),
                url,
            };
        }
        match value {
            Value::Null => Self::Empty,
            Value::Text(text) => Self::Text(text.clone()),
            Value::Number(_) => Self::Text(value.to_text()),
            Value::List(items) => Self::Chips(
                items
                    .iter()
                    .filter(|item| !item.trim().is_empty())
                    .cloned()
                    .collect(),
            ),
            Value::Structured(_) if value.is_answer_pair() => {
                let answer = value.answer().unwrap_or_default();
                Self::Answer {
                    tone: AnswerTone::from_answer(&answer),
                    answer,
                    details: value.details().filter(|details| !details.is_empty()),
                }
            }
            Value::Structured(map) => Self::Entries(
                map.iter()
                    .map(|(key, member)| {
                        let text = match member {
                            JsonValue::String(text) => text.clone(),
                            other => other.to_string(),
                        };
                        (key.clone(), text)
                    })
                    .collect(),
            ),
        }
    }

    /// Plain-text rendering for terminals and logs.
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Link { text, url } => format!("{text} <{url}>"),
            Self::Chips(items) => items.join(", "),
            Self::Answer {
                answer, details, ..
            } => match details {
                Some(details) => format!("Answer: {answer}\nDetails: {details}"),
                None => format!("Answer: {answer}"),
            },
            Self::Entries(entries) => entries
                .iter()
                .map(|(key, text)| format!("{key}: {text}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One labelled row of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailEntry {
    pub field: String,
    pub value: DetailValue,
}

/// Everything shown when inspecting a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub entries: Vec<DetailEntry>,
}

impl DetailView {
    /// Build the view for `record`.
    ///
    /// Entries follow the schema's listed order; fields the schema does not
    /// list come last, alphabetically.
    pub fn build(record: &NormalizedRecord, schema: &Schema) -> Self {
        let title = record
            .title()
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let mut fields: Vec<&str> = record
            .fields()
            .filter(|field| {
                *field != names::TITLE
                    && !DETAIL_EXCLUDED_FIELDS.contains(field)
                    && !field.contains(names::EXTRACTED_MARKER)
                    && !schema.is_hidden(field)
            })
            .collect();
        fields.sort_by(|a, b| match (schema.position(a), schema.position(b)) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        });

        let entries = fields
            .into_iter()
            .filter_map(|field| {
                let value = record.get(field)?;
                Some(DetailEntry {
                    field: field.to_string(),
                    value: DetailValue::render(field, value),
                })
            })
            .collect();

        Self { title, entries }
    }

    pub fn entry(&self, field: &str) -> Option<&DetailEntry> {
        self.entries.iter().find(|entry| entry.field == field)
    }
}

/// External link for DOI, PMID and PMCID values.
pub fn identifier_link(field: &str, value: &Value) -> Option<String> {
    if value.is_blank() {
        return None;
    }
    let text = value.to_text();
    let text = text.trim();
    match field {
        names::DOI => Some(format!("https://doi.org/{}", encode_component(text))),
        names::PMID => Some(format!(
            "https://pubmed.ncbi.nlm.nih.gov/{}/",
            encode_component(text)
        )),
        names::PMCID => {
            let id = match text.split_at_checked(3) {
                Some((prefix, rest)) if prefix.eq_ignore_ascii_case("PMC") => rest,
                _ => text,
            };
            Some(format!(
                "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC{}/",
                encode_component(id)
            ))
        }
        _ => None,
    }
}

fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}
