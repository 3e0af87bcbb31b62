//! Data model for the study browser.
//!
//! Normalized records, the inferred schema, the persisted view state and the
//! query result shared by every other crate in the workspace.

pub mod error;
pub mod field;
pub mod names;
pub mod payload;
pub mod query;
pub mod record;
pub mod schema;
pub mod value;
pub mod view;

pub use error::{ModelError, Result};
pub use field::{ColumnDef, Field, FieldKind, HeaderFilter};
pub use payload::Payload;
pub use query::{Group, QueryResult};
pub use record::NormalizedRecord;
pub use schema::Schema;
pub use value::{Value, format_number};
pub use view::{Density, FilterSpec, SortDirection, SortKey, ViewState};

/// An unprocessed study description exactly as it was read from the source.
pub type RawRecord = serde_json::Value;
