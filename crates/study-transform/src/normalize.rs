//! Raw study description → flat record.

use std::time::Instant;

use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, info_span};

use study_model::{NormalizedRecord, RawRecord, Value, names};

use crate::specialties::collect_specialties;
use crate::tables::{
    DATE_KEY, EXTRACTED_DATA_KEY, EXTRACTED_RENAMES, PASSTHROUGH_FIELDS, PROCESSED_DATA_KEY,
    PROCESSED_RENAMES, SPECIALTIES_KEY, TEMP_YEAR_KEY,
};
use crate::year::derive_year;

/// Field tables driving normalization.
///
/// [`Normalizer::default`] uses the built-in tables; normalization is a pure
/// function of the raw input and these tables.
#[derive(Debug, Clone)]
pub struct Normalizer {
    passthrough: Vec<String>,
    extracted_renames: Vec<(String, String)>,
    processed_renames: Vec<(String, String)>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            passthrough: PASSTHROUGH_FIELDS.iter().map(ToString::to_string).collect(),
            extracted_renames: owned_pairs(&EXTRACTED_RENAMES),
            processed_renames: owned_pairs(&PROCESSED_RENAMES),
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(source, target)| ((*source).to_string(), (*target).to_string()))
        .collect()
}

impl Normalizer {
    /// Add a top-level field to the passthrough allow-list.
    #[must_use]
    pub fn with_passthrough(mut self, field: impl Into<String>) -> Self {
        self.passthrough.push(field.into());
        self
    }

    /// Add an `extracted_data` rename.
    #[must_use]
    pub fn with_extracted_rename(
        mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.extracted_renames.push((source.into(), target.into()));
        self
    }

    /// Normalize one raw record. Never fails: a non-object input or a
    /// missing sub-structure simply contributes no fields.
    pub fn normalize(&self, raw: &RawRecord) -> NormalizedRecord {
        let empty = Map::new();
        let object = raw.as_object().unwrap_or(&empty);
        let mut record = NormalizedRecord::new();

        for field in &self.passthrough {
            if let Some(value) = object.get(field) {
                record.insert(field.clone(), Value::from_json(value));
            }
        }

        if let Some(year) = derive_year(object.get(DATE_KEY), object.get(TEMP_YEAR_KEY)) {
            record.insert(names::YEAR, Value::from(year));
        }

        if let Some(extracted) = object.get(EXTRACTED_DATA_KEY).and_then(JsonValue::as_object) {
            copy_renamed(&mut record, extracted, &self.extracted_renames);
        }

        if let Some(processed) = object.get(PROCESSED_DATA_KEY).and_then(JsonValue::as_object) {
            copy_renamed(&mut record, processed, &self.processed_renames);
            if let Some(items) = processed.get(SPECIALTIES_KEY).and_then(JsonValue::as_array) {
                let sets = collect_specialties(items);
                if !sets.specialties.is_empty() {
                    record.insert(names::SPECIALTY, Value::list(sets.specialties));
                }
                if !sets.subspecialties.is_empty() {
                    record.insert(names::SUBSPECIALTY, Value::list(sets.subspecialties));
                }
            }
        }

        record
    }
}

fn copy_renamed(
    record: &mut NormalizedRecord,
    source: &Map<String, JsonValue>,
    renames: &[(String, String)],
) {
    for (from, to) in renames {
        if let Some(value) = source.get(from) {
            record.insert(to.clone(), Value::from_json(value));
        }
    }
}

/// Normalize one raw record with the built-in tables.
pub fn normalize(raw: &RawRecord) -> NormalizedRecord {
    Normalizer::default().normalize(raw)
}

/// Normalize a whole batch.
pub fn normalize_all(raws: &[RawRecord]) -> Vec<NormalizedRecord> {
    let span = info_span!("normalize", record_count = raws.len());
    let _guard = span.enter();
    let start = Instant::now();
    let normalizer = Normalizer::default();
    let records: Vec<NormalizedRecord> = raws.iter().map(|raw| normalizer.normalize(raw)).collect();
    let without_year = records
        .iter()
        .filter(|record| !record.contains(names::YEAR))
        .count();
    if without_year > 0 {
        debug!(without_year, "records without a derivable year");
    }
    info!(
        record_count = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "normalization complete"
    );
    records
}
