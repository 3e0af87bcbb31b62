//! Line-delimited JSON parsing.
//!
//! Every non-blank line holds one raw study record. Exporters upstream write
//! bare `NaN` tokens for missing numbers, so a line that fails to parse is
//! retried once with `NaN` replaced by `null`. A line that still fails is
//! skipped and reported, never raised.

use serde_json::Value as JsonValue;
use tracing::warn;

use study_model::RawRecord;

/// Number of characters of a skipped line kept for diagnostics.
const PREVIEW_CHARS: usize = 120;

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub preview: String,
    pub reason: String,
}

/// Records read from a source plus the lines that were dropped.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub records: Vec<RawRecord>,
    pub skipped: Vec<SkippedLine>,
}

pub fn parse_jsonl(text: &str) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(record) => outcome.records.push(record),
            Err(error) => {
                let skipped = SkippedLine {
                    line_number: index + 1,
                    preview: line.chars().take(PREVIEW_CHARS).collect(),
                    reason: error.to_string(),
                };
                warn!(
                    line_number = skipped.line_number,
                    reason = %skipped.reason,
                    preview = %skipped.preview,
                    "skipping malformed line"
                );
                outcome.skipped.push(skipped);
            }
        }
    }
    outcome
}

fn parse_line(line: &str) -> Result<JsonValue, serde_json::Error> {
    serde_json::from_str(line).or_else(|_| serde_json::from_str(&replace_nan(line)))
}

pub(crate) fn replace_nan(text: &str) -> String {
    text.replace("NaN", "null")
}
