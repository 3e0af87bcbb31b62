//! Query results.
//!
//! Results reference records by their index in the session's record slice so
//! they can be cached next to the records without borrowing them.

use crate::record::NormalizedRecord;

/// Ordered, optionally grouped output of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Filtered and sorted record indices.
    pub rows: Vec<usize>,
    /// Field the rows were grouped by, if any.
    pub group_by: Option<String>,
    /// Groups in ascending key order. Empty when ungrouped.
    pub groups: Vec<Group>,
}

/// Records sharing one group-by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub rows: Vec<usize>,
}

impl QueryResult {
    pub fn ungrouped(rows: Vec<usize>) -> Self {
        Self {
            rows,
            group_by: None,
            groups: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_by.is_some()
    }

    /// Resolve the flat row sequence against the record slice.
    pub fn records<'a>(
        &'a self,
        records: &'a [NormalizedRecord],
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        resolve(&self.rows, records)
    }
}

impl Group {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records<'a>(
        &'a self,
        records: &'a [NormalizedRecord],
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        resolve(&self.rows, records)
    }
}

fn resolve<'a>(
    rows: &'a [usize],
    records: &'a [NormalizedRecord],
) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
    rows.iter().filter_map(move |&index| records.get(index))
}
