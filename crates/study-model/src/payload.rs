use serde::{Deserialize, Serialize};

use crate::field::ColumnDef;
use crate::record::NormalizedRecord;
use crate::schema::Schema;

/// Everything the presentation layer needs to draw the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub records: Vec<NormalizedRecord>,
    pub columns: Vec<ColumnDef>,
    /// Schema order, hidden fields excluded.
    pub all_fields: Vec<String>,
    pub hidden_everywhere: Vec<String>,
}

impl Payload {
    pub fn new(records: Vec<NormalizedRecord>, schema: &Schema) -> Self {
        Self {
            records,
            columns: schema.columns(),
            all_fields: schema.all_fields(),
            hidden_everywhere: schema.hidden_everywhere(),
        }
    }
}
