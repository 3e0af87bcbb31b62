//! Source file → normalized records.

use std::path::Path;

use study_ingest::{SkippedLine, parse_records, read_records};
use study_model::{NormalizedRecord, RawRecord};
use study_transform::normalize_all;

use crate::error::Result;

/// Normalized records of one source plus the lines that were dropped.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<SkippedLine>,
}

impl Dataset {
    pub fn from_raw(raws: &[RawRecord]) -> Self {
        Self {
            records: normalize_all(raws),
            skipped: Vec::new(),
        }
    }

    /// Parse JSON Lines or JSON array text.
    pub fn from_text(text: &str) -> Result<Self> {
        let outcome = parse_records(text)?;
        Ok(Self {
            records: normalize_all(&outcome.records),
            skipped: outcome.skipped,
        })
    }
}

/// Read and normalize a source file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let outcome = read_records(path)?;
    Ok(Dataset {
        records: normalize_all(&outcome.records),
        skipped: outcome.skipped,
    })
}
