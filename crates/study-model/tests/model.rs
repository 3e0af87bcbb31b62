//! Tests for study-model types.

use study_model::{
    ColumnDef, Field, FieldKind, Group, HeaderFilter, NormalizedRecord, Payload, QueryResult,
    Schema, Value,
};

fn field(name: &str, kind: FieldKind, visible: bool, hidden: bool) -> Field {
    Field {
        name: name.to_string(),
        kind,
        frequency: 1,
        visible_by_default: visible,
        hidden_everywhere: hidden,
    }
}

fn sample_schema() -> Schema {
    Schema::new(vec![
        field("Title", FieldKind::String, true, false),
        field("index", FieldKind::Number, false, true),
        field("Year", FieldKind::Number, true, false),
        field("Specialty (Extracted)", FieldKind::String, false, true),
        field("PMID", FieldKind::String, false, false),
    ])
}

#[test]
fn schema_lists_exclude_hidden_fields() {
    let schema = sample_schema();
    assert_eq!(schema.all_fields(), vec!["Title", "Year", "PMID"]);
    assert_eq!(
        schema.hidden_everywhere(),
        vec!["Specialty (Extracted)", "index"]
    );
    assert_eq!(schema.position("PMID"), Some(2));
    assert_eq!(schema.position("index"), None);
    assert!(schema.is_hidden("index"));
}

#[test]
fn columns_carry_filter_hints() {
    let columns = sample_schema().columns();
    assert_eq!(
        columns[1],
        ColumnDef {
            title: "Year".into(),
            field: "Year".into(),
            visible: true,
            header_filter: HeaderFilter::Number,
        }
    );
    assert_eq!(columns[2].header_filter, HeaderFilter::Input);
    assert!(!columns[2].visible);
}

#[test]
fn payload_serializes_presentation_layout() {
    let record: NormalizedRecord = [("Title", Value::from("A study")), ("Year", Value::from(2021))]
        .into_iter()
        .collect();
    let payload = Payload::new(vec![record], &sample_schema());
    let json = serde_json::to_value(&payload).expect("serialize payload");
    assert_eq!(json["records"][0]["Year"], 2021);
    assert_eq!(json["columns"][0]["headerFilter"], "input");
    assert_eq!(json["all_fields"][2], "PMID");
    assert_eq!(json["hidden_everywhere"][1], "index");

    let round: Payload = serde_json::from_value(json).expect("deserialize payload");
    assert_eq!(round, payload);
}

#[test]
fn query_result_resolves_rows() {
    let records: Vec<NormalizedRecord> = ["a", "b", "c"]
        .into_iter()
        .map(|title| [("Title", Value::from(title))].into_iter().collect())
        .collect();
    let result = QueryResult {
        rows: vec![2, 0],
        group_by: Some("Title".into()),
        groups: vec![Group {
            key: "c".into(),
            rows: vec![2],
        }],
    };
    let titles: Vec<String> = result.records(&records).map(|r| r.text("Title")).collect();
    assert_eq!(titles, vec!["c", "a"]);
    assert!(result.is_grouped());
    assert_eq!(result.groups[0].records(&records).count(), 1);
}
