//! Export formats and file output.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use tracing::info;

use study_model::NormalizedRecord;

use crate::csv_export::write_csv;
use crate::error::{ExportError, Result};
use crate::json_export::write_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// File name used when no output path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Csv => "studies_filtered.csv",
            Self::Json => "studies_filtered.json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub record_count: usize,
}

/// Export `records` to `path`.
///
/// `fields` is the column order used by CSV; JSON keeps every record key.
pub fn export_to_path(
    path: &Path,
    format: ExportFormat,
    records: &[&NormalizedRecord],
    fields: &[String],
) -> Result<ExportSummary> {
    let start = Instant::now();
    let file = File::create(path).map_err(|source| ExportError::io(path, source))?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(writer, records, fields)?,
        ExportFormat::Json => write_json(writer, records)?,
    }
    info!(
        path = %path.display(),
        format = %format,
        record_count = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    Ok(ExportSummary {
        path: path.to_path_buf(),
        format,
        record_count: records.len(),
    })
}
