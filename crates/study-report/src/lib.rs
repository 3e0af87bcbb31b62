//! Export of query results.
//!
//! Exports contain the flat filtered and sorted record sequence. Groups and
//! column visibility are not reflected:
//!
//! - **CSV**: one column per listed schema field, in schema order; lists and
//!   structured values are written as compact JSON
//! - **JSON**: pretty-printed array of the complete records

mod csv_export;
mod error;
mod format;
mod json_export;

pub use csv_export::{CsvExport, csv_cell, csv_string, decode_cell, read_csv_export, write_csv};
pub use error::{ExportError, Result};
pub use format::{ExportFormat, ExportSummary, export_to_path};
pub use json_export::{json_string, write_json};
