use serde_json::json;

use study_core::{group_by_candidates, infer_schema};
use study_model::{FieldKind, HeaderFilter, NormalizedRecord, Value};
use study_transform::normalize_all;

fn records(values: &[serde_json::Value]) -> Vec<NormalizedRecord> {
    values
        .iter()
        .map(|value| serde_json::from_value(value.clone()).expect("record"))
        .collect()
}

#[test]
fn orders_fields_by_frequency_then_first_seen() {
    let records = records(&[
        json!({"Title": "a", "Region": "EU"}),
        json!({"Abstract": "x", "Title": "b", "Region": "US"}),
        json!({"Abstract": "y", "Title": "c", "Year": 2020}),
    ]);
    let schema = infer_schema(&records);
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Title", "Region", "Abstract", "Year"]);
    assert_eq!(schema.field("Region").map(|f| f.frequency), Some(2));
}

#[test]
fn title_is_always_present() {
    let records = records(&[json!({"Year": 2020}), json!({"Year": 2021})]);
    let schema = infer_schema(&records);
    let title = schema.field("Title").expect("title");
    assert_eq!(title.frequency, 0);
    assert_eq!(title.kind, FieldKind::String);
    assert!(title.column().visible);

    let empty = infer_schema(&[]);
    assert_eq!(empty.all_fields(), vec!["Title".to_string()]);
}

#[test]
fn hidden_fields_stay_out_of_listings() {
    let raws = vec![json!({
        "index": 1,
        "Title": "t",
        "extracted_data": {"specialty": "Cardiology", "sample_size": 10}
    })];
    let records = normalize_all(&raws);
    let schema = infer_schema(&records);
    assert_eq!(
        schema.hidden_everywhere(),
        vec!["Specialty (Extracted)".to_string(), "index".to_string()]
    );
    assert!(!schema.all_fields().contains(&"index".to_string()));
    assert!(records[0].contains("index"));
}

#[test]
fn column_hints_follow_kinds() {
    let records = records(&[
        json!({"Title": "a", "Year": 2019, "Models Used": ["GPT-4"], "Sample Size": "12"}),
        json!({"Title": "b", "Year": 2020, "Models Used": null, "Sample Size": "n/a"}),
    ]);
    let schema = infer_schema(&records);
    assert_eq!(schema.field("Year").map(|f| f.kind), Some(FieldKind::Number));
    assert_eq!(schema.field("Models Used").map(|f| f.kind), Some(FieldKind::List));
    assert_eq!(schema.field("Sample Size").map(|f| f.kind), Some(FieldKind::String));

    let year = schema.columns().into_iter().find(|c| c.field == "Year").expect("year");
    assert_eq!(year.header_filter, HeaderFilter::Number);
    assert!(year.visible);
    let models = schema
        .columns()
        .into_iter()
        .find(|c| c.field == "Models Used")
        .expect("models");
    assert_eq!(models.header_filter, HeaderFilter::Input);
    assert!(!models.visible);
}

#[test]
fn group_candidates_are_limited_to_known_fields() {
    let mut record = NormalizedRecord::new();
    record.insert("Title", Value::from("t"));
    record.insert("Region", Value::from("EU"));
    record.insert("Year", Value::Number(2020.0));
    let schema = infer_schema(&[record]);
    assert_eq!(group_by_candidates(&schema), vec!["Year", "Region"]);
}
