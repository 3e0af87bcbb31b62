//! JSON export.

use std::io::Write;

use study_model::NormalizedRecord;

use crate::error::Result;

/// Write `records` as a pretty-printed JSON array, every key included.
pub fn write_json<W: Write>(mut writer: W, records: &[&NormalizedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush().map_err(serde_json::Error::io)?;
    Ok(())
}

pub fn json_string(records: &[&NormalizedRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
