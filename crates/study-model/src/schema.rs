//! The canonical, frequency-ordered field list.

use serde::{Deserialize, Serialize};

use crate::field::{ColumnDef, Field};

/// Ordered fields of a record batch.
///
/// Hidden-everywhere fields stay in the schema (and in the records) but are
/// left out of [`Schema::all_fields`] and [`Schema::columns`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Every field in schema order, hidden ones included.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields offered for filtering, searching and display.
    pub fn listed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.hidden_everywhere)
    }

    /// Names of the listed fields in schema order.
    pub fn all_fields(&self) -> Vec<String> {
        self.listed_fields().map(|field| field.name.clone()).collect()
    }

    /// Sorted names of the hidden-everywhere fields.
    pub fn hidden_everywhere(&self) -> Vec<String> {
        let mut hidden: Vec<String> = self
            .fields
            .iter()
            .filter(|field| field.hidden_everywhere)
            .map(|field| field.name.clone())
            .collect();
        hidden.sort();
        hidden
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.field(name).is_some_and(|field| field.hidden_everywhere)
    }

    /// Position of a listed field in [`Schema::all_fields`].
    pub fn position(&self, name: &str) -> Option<usize> {
        self.listed_fields().position(|field| field.name == name)
    }

    pub fn columns(&self) -> Vec<ColumnDef> {
        self.listed_fields().map(Field::column).collect()
    }
}
