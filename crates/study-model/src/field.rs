//! Schema fields and the column definitions derived from them.

use serde::{Deserialize, Serialize};

use crate::names;

/// Value kind inferred for a field across all records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    String,
    Number,
    List,
    Structured,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::List => "list",
            Self::Structured => "structured",
        }
    }
}

/// Filter widget hint handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFilter {
    Number,
    Input,
}

/// One field of the inferred schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Number of records in which the field is present.
    pub frequency: usize,
    pub visible_by_default: bool,
    /// Internal or derived field kept out of listings, filtering and search.
    pub hidden_everywhere: bool,
}

impl Field {
    pub fn is_title(&self) -> bool {
        self.name == names::TITLE
    }

    pub fn header_filter(&self) -> HeaderFilter {
        match self.kind {
            FieldKind::Number => HeaderFilter::Number,
            _ => HeaderFilter::Input,
        }
    }

    pub fn column(&self) -> ColumnDef {
        ColumnDef {
            title: self.name.clone(),
            field: self.name.clone(),
            visible: self.is_title() || self.visible_by_default,
            header_filter: self.header_filter(),
        }
    }
}

/// Column definition in the presentation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub title: String,
    pub field: String,
    pub visible: bool,
    pub header_filter: HeaderFilter,
}
