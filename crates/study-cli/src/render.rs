//! Terminal rendering of schemas, results and detail views.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use study_core::{DetailValue, DetailView, group_by_candidates};
use study_model::{Field, NormalizedRecord, QueryResult, Schema, ViewState, Value};

/// Longest cell text printed in result tables.
pub const MAX_CELL_CHARS: usize = 80;

/// Group header text, e.g. `Year: 2021 — 3 studies`.
pub fn group_label(field: &str, key: &str, count: usize) -> String {
    let noun = if count == 1 { "study" } else { "studies" };
    format!("{field}: {key} — {count} {noun}")
}

/// Schema overview table.
pub fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Records"),
        header_cell("Shown"),
        header_cell("Hidden"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    for field in schema.fields() {
        table.add_row(vec![
            field_cell(field),
            Cell::new(field.kind.as_str()),
            Cell::new(field.frequency),
            flag_cell(field.is_title() || field.visible_by_default),
            flag_cell(field.hidden_everywhere),
        ]);
    }
    table
}

/// Group-by candidates line for the summary.
pub fn group_candidates_line(schema: &Schema) -> String {
    let candidates = group_by_candidates(schema);
    if candidates.is_empty() {
        "Group by: (none)".to_string()
    } else {
        format!("Group by: {}", candidates.join(", "))
    }
}

/// Result rows restricted to the visible columns.
///
/// Grouped results get a header row per group; `limit` caps the number of
/// record rows.
pub fn results_table(
    records: &[NormalizedRecord],
    schema: &Schema,
    view: &ViewState,
    result: &QueryResult,
    limit: Option<usize>,
) -> Table {
    let fields = view.visible_fields(schema);
    let mut table = Table::new();
    table.set_header(fields.iter().map(|field| header_cell(&field.name)).collect::<Vec<_>>());
    apply_table_style(&mut table);

    let mut remaining = limit.unwrap_or(usize::MAX);
    match &result.group_by {
        Some(group_field) if !result.groups.is_empty() => {
            for group in &result.groups {
                if remaining == 0 {
                    break;
                }
                let mut header = vec![group_cell(&group_label(group_field, &group.key, group.len()))];
                header.extend(fields.iter().skip(1).map(|_| Cell::new("")));
                table.add_row(header);
                for record in group.records(records).take(remaining) {
                    table.add_row(record_row(record, &fields));
                    remaining -= 1;
                }
            }
        }
        _ => {
            for record in result.records(records).take(remaining) {
                table.add_row(record_row(record, &fields));
            }
        }
    }
    table
}

/// Detail view as plain text: the title, an underline, then one block per field.
pub fn detail_text(detail: &DetailView) -> String {
    let mut lines = vec![detail.title.clone(), "=".repeat(detail.title.chars().count())];
    for entry in &detail.entries {
        let text = entry.value.to_plain_text();
        match &entry.value {
            DetailValue::Empty => lines.push(format!("{}: -", entry.field)),
            DetailValue::Answer { .. } | DetailValue::Entries(_) => {
                lines.push(format!("{}:", entry.field));
                lines.extend(text.lines().map(|line| format!("  {line}")));
            }
            _ => lines.push(format!("{}: {text}", entry.field)),
        }
    }
    lines.join("\n")
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate_cell(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn record_row(record: &NormalizedRecord, fields: &[&Field]) -> Vec<Cell> {
    fields
        .iter()
        .map(|field| match record.get(&field.name) {
            None | Some(Value::Null) => dim_cell("-"),
            Some(value) => Cell::new(truncate_cell(&value.to_text(), MAX_CELL_CHARS)),
        })
        .collect()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn group_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Yellow)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: &Field) -> Cell {
    if field.hidden_everywhere {
        dim_cell(&field.name)
    } else {
        Cell::new(&field.name)
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
