//! Filtering, searching, sorting and grouping.
//!
//! Every evaluation starts from the full record slice; nothing is cached
//! between calls.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, info_span};

use study_model::{
    Group, NormalizedRecord, QueryResult, Schema, SortDirection, SortKey, ViewState, names,
};

/// Evaluate `view` against `records`.
///
/// Result rows are indices into `records`. When the view groups, the flat
/// row sequence keeps the sorted order and each group keeps that order too.
pub fn run_query(records: &[NormalizedRecord], schema: &Schema, view: &ViewState) -> QueryResult {
    let span = info_span!("query", record_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();

    let filters: Vec<(&str, String)> = view
        .active_filters()
        .map(|(field, pattern)| (field, pattern.to_lowercase()))
        .collect();
    let needle = view.search_needle();
    let search_fields: Vec<&str> = schema
        .listed_fields()
        .map(|field| field.name.as_str())
        .collect();

    let mut rows: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_filters(record, &filters))
        .filter(|(_, record)| {
            needle
                .as_deref()
                .is_none_or(|needle| matches_search(record, &search_fields, needle))
        })
        .map(|(index, _)| index)
        .collect();

    sort_rows(records, &mut rows, &view.sort);

    let result = match &view.group_by {
        Some(field) => group_rows(records, rows, field),
        None => QueryResult::ungrouped(rows),
    };
    debug!(
        filter_count = filters.len(),
        searching = needle.is_some(),
        sort_keys = view.sort.len(),
        group_count = result.groups.len(),
        row_count = result.len(),
        duration_ms = start.elapsed().as_millis(),
        "query evaluated"
    );
    result
}

/// Every filter's lowercase pattern occurs in the field's text.
/// Null and missing values never match.
pub fn matches_filters(record: &NormalizedRecord, filters: &[(&str, String)]) -> bool {
    filters.iter().all(|(field, pattern)| {
        record
            .get(field)
            .is_some_and(|value| value.contains_lowercase(pattern))
    })
}

/// Any of `fields` contains the lowercase `needle`.
pub fn matches_search(record: &NormalizedRecord, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .get(field)
            .is_some_and(|value| value.contains_lowercase(needle))
    })
}

/// Stable multi-key sort on the text form of each key field.
pub fn sort_rows(records: &[NormalizedRecord], rows: &mut Vec<usize>, keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    let mut keyed: Vec<(usize, Vec<String>)> = rows
        .iter()
        .map(|&index| {
            let texts = keys
                .iter()
                .map(|key| records[index].text(&key.field))
                .collect();
            (index, texts)
        })
        .collect();
    keyed.sort_by(|(_, left), (_, right)| compare_keys(left, right, keys));
    *rows = keyed.into_iter().map(|(index, _)| index).collect();
}

fn compare_keys(left: &[String], right: &[String], keys: &[SortKey]) -> Ordering {
    for ((a, b), key) in left.iter().zip(right).zip(keys) {
        let ordering = match key.direction {
            SortDirection::Ascending => a.cmp(b),
            SortDirection::Descending => b.cmp(a),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Partition sorted rows into groups keyed by the field's text.
pub fn group_rows(records: &[NormalizedRecord], rows: Vec<usize>, field: &str) -> QueryResult {
    let mut buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for &index in &rows {
        buckets
            .entry(group_key(&records[index], field))
            .or_default()
            .push(index);
    }
    QueryResult {
        rows,
        group_by: Some(field.to_string()),
        groups: buckets
            .into_iter()
            .map(|(key, rows)| Group { key, rows })
            .collect(),
    }
}

/// Group key of a record; null, missing and empty values share
/// [`names::BLANK_GROUP_KEY`].
pub fn group_key(record: &NormalizedRecord, field: &str) -> String {
    match record.get(field) {
        Some(value) if !value.is_blank() => value.to_text(),
        _ => names::BLANK_GROUP_KEY.to_string(),
    }
}
