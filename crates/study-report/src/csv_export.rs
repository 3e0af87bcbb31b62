//! CSV export.

use std::io::Write;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

use serde_json::Value as JsonValue;
use study_model::{NormalizedRecord, Value, format_number};

use crate::error::{ExportError, Result};

/// Write `records` as CSV with one column per entry of `fields`.
///
/// Scalars are written as their text form, lists and structured values as
/// compact JSON; missing and null values are empty. Cells are quoted only
/// when they contain a delimiter, quote or line break.
pub fn write_csv<W: Write>(writer: W, records: &[&NormalizedRecord], fields: &[String]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(fields)?;
    for record in records {
        writer.write_record(fields.iter().map(|field| csv_cell(record.get(field))))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Cell text of one value.
pub fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(value @ (Value::List(_) | Value::Structured(_))) => value.to_json().to_string(),
        Some(value) => value.to_text(),
    }
}

/// Value of a cell written by [`csv_cell`].
///
/// Empty cells are null, JSON arrays and objects become lists and structured
/// values, canonical numbers become numbers and anything else is text.
pub fn decode_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if (cell.starts_with('[') || cell.starts_with('{'))
        && let Ok(json @ (JsonValue::Array(_) | JsonValue::Object(_))) =
            serde_json::from_str::<JsonValue>(cell)
    {
        return Value::from_json(&json);
    }
    match cell.parse::<f64>() {
        Ok(number) if number.is_finite() && format_number(number) == cell => Value::Number(number),
        _ => Value::from(cell),
    }
}

/// CSV export as a string.
pub fn csv_string(records: &[&NormalizedRecord], fields: &[String]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, records, fields)?;
    Ok(String::from_utf8(buffer)?)
}

/// A parsed CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvExport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvExport {
    /// Cell of `row` under `field`.
    pub fn cell(&self, row: usize, field: &str) -> Option<&str> {
        let column = self.headers.iter().position(|header| header == field)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Decoded value of `row` under `field`.
    pub fn value(&self, row: usize, field: &str) -> Option<Value> {
        self.cell(row, field).map(decode_cell)
    }
}

/// Parse CSV text produced by [`write_csv`].
pub fn read_csv_export(text: &str) -> Result<CsvExport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()?
        .iter()
        .map(ToString::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| row.map(|row| row.iter().map(ToString::to_string).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()
        .map_err(ExportError::from)?;
    Ok(CsvExport { headers, rows })
}
