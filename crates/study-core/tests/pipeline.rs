use std::fs;

use tempfile::tempdir;

use study_core::{CoreError, Dataset, infer_schema, load_dataset};

#[test]
fn loads_and_normalizes_a_jsonl_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("studies.jsonl");
    fs::write(
        &path,
        concat!(
            "{\"Title\": \"A\", \"Date\": \"2019-05-01\", \"processed_data\": {\"task_types\": [\"Diagnosis\"]}}\n",
            "\n",
            "{\"Title\": \"B\", \"Sample Size\": NaN}\n",
            "{broken\n",
        ),
    )
    .unwrap();

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.skipped.len(), 1);
    assert_eq!(dataset.skipped[0].line_number, 4);

    let schema = infer_schema(&dataset.records);
    assert!(schema.field("Task Types").is_some());
    assert!(schema.field("Year").is_some());
}

#[test]
fn missing_file_is_an_ingest_error() {
    let dir = tempdir().unwrap();
    let error = load_dataset(&dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(error, CoreError::Ingest(_)));
}

#[test]
fn array_text_is_accepted() {
    let dataset = Dataset::from_text(r#"[{"Title": "A"}, {"Title": "B", "DOI": "10.1/b"}]"#).unwrap();
    assert_eq!(dataset.records.len(), 2);
    assert!(dataset.skipped.is_empty());
}
