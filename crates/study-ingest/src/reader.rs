//! Source file reading with format detection.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde_json::Value as JsonValue;
use tracing::{debug, info, info_span};

use study_model::RawRecord;

use crate::error::{IngestError, Result};
use crate::jsonl::{IngestOutcome, parse_jsonl, replace_nan};

/// Layout of a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One JSON record per line.
    JsonLines,
    /// A single JSON array of records.
    JsonArray,
}

/// A source starting with `[` is a JSON array; anything else is JSON Lines.
pub fn detect_format(text: &str) -> SourceFormat {
    match text.trim_start_matches('\u{feff}').trim_start().chars().next() {
        Some('[') => SourceFormat::JsonArray,
        _ => SourceFormat::JsonLines,
    }
}

/// Parse raw records from source text.
///
/// # Errors
///
/// Returns [`IngestError::InvalidArray`] when a JSON array source cannot be
/// parsed even after `NaN` tokens are replaced. JSON Lines sources never
/// fail; malformed lines are reported in [`IngestOutcome::skipped`].
pub fn parse_records(text: &str) -> Result<IngestOutcome> {
    match detect_format(text) {
        SourceFormat::JsonLines => Ok(parse_jsonl(text)),
        SourceFormat::JsonArray => {
            let text = text.trim_start_matches('\u{feff}');
            let records: Vec<RawRecord> = serde_json::from_str(text)
                .or_else(|_| serde_json::from_str::<Vec<JsonValue>>(&replace_nan(text)))
                .map_err(|source| IngestError::InvalidArray { source })?;
            Ok(IngestOutcome {
                records,
                skipped: Vec::new(),
            })
        }
    }
}

/// Read raw records from a file.
pub fn read_records(path: &Path) -> Result<IngestOutcome> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let text = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    let format = detect_format(&text);
    debug!(path = %path.display(), ?format, bytes = text.len(), "read source");
    let outcome = parse_records(&text)?;
    info!(
        path = %path.display(),
        record_count = outcome.records.len(),
        skipped_count = outcome.skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "records loaded"
    );
    Ok(outcome)
}
