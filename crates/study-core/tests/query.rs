use proptest::prelude::*;

use study_core::{infer_schema, run_query};
use study_model::{NormalizedRecord, SortKey, Value, ViewState};

fn record(fields: &[(&str, Value)]) -> NormalizedRecord {
    fields.iter().cloned().collect()
}

fn studies() -> Vec<NormalizedRecord> {
    vec![
        record(&[
            ("Title", Value::from("Cancer Screening")),
            ("Year", Value::Number(2021.0)),
            ("Region", Value::from("Europe")),
            ("Models Used", Value::list(["GPT-4"])),
        ]),
        record(&[
            ("Title", Value::from("Radiology reports")),
            ("Year", Value::Number(2020.0)),
            ("Region", Value::Null),
        ]),
        record(&[
            ("Title", Value::from("cancer triage")),
            ("Year", Value::Number(2021.0)),
            ("Region", Value::from("Asia")),
            ("index", Value::Number(99.0)),
        ]),
        record(&[
            ("Title", Value::from("Dermatology")),
            ("Region", Value::from("")),
        ]),
    ]
}

#[test]
fn filters_are_case_insensitive() {
    let records = studies();
    let schema = infer_schema(&records);
    for pattern in ["CANCER", "cancer", "Cancer"] {
        let mut view = ViewState::default();
        view.set_filter("Title", pattern);
        assert_eq!(run_query(&records, &schema, &view).rows, vec![0, 2]);
    }
}

#[test]
fn whitespace_filter_is_inactive_but_pattern_is_not_trimmed() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_filter("Title", "   ");
    assert_eq!(run_query(&records, &schema, &view).len(), 4);

    view.set_filter("Title", "cancer ");
    assert_eq!(run_query(&records, &schema, &view).rows, vec![0, 2]);
    view.set_filter("Title", " cancer");
    assert!(run_query(&records, &schema, &view).is_empty());
}

#[test]
fn filter_on_null_or_missing_value_never_matches() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_filter("Models Used", "g");
    assert_eq!(run_query(&records, &schema, &view).rows, vec![0]);
}

#[test]
fn global_search_skips_hidden_fields_but_not_invisible_ones() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_global_query("  ASIA ");
    view.set_column_visible("Region", false);
    assert_eq!(run_query(&records, &schema, &view).rows, vec![2]);

    view.set_global_query("99");
    assert!(run_query(&records, &schema, &view).is_empty());

    view.set_global_query("gpt-4");
    assert_eq!(run_query(&records, &schema, &view).rows, vec![0]);
}

#[test]
fn multi_key_sort_is_stable() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_sort([SortKey::descending("Year")]);
    // Equal years keep input order.
    assert_eq!(run_query(&records, &schema, &view).rows, vec![0, 2, 1, 3]);

    view.set_sort([SortKey::descending("Year"), SortKey::ascending("Title")]);
    assert_eq!(run_query(&records, &schema, &view).rows, vec![0, 2, 1, 3]);

    view.set_sort([SortKey::descending("Year"), SortKey::descending("Title")]);
    assert_eq!(run_query(&records, &schema, &view).rows, vec![2, 0, 1, 3]);
}

#[test]
fn grouping_uses_blank_bucket_and_sorted_keys() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_group_by(Some("Region".into()));
    let result = run_query(&records, &schema, &view);
    let keys: Vec<&str> = result.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["(blank)", "Asia", "Europe"]);
    assert_eq!(result.groups[0].rows, vec![1, 3]);
    assert_eq!(result.rows, vec![0, 1, 2, 3]);
}

#[test]
fn empty_result_is_valid() {
    let records = studies();
    let schema = infer_schema(&records);
    let mut view = ViewState::default();
    view.set_global_query("no such study");
    view.set_group_by(Some("Year".into()));
    let result = run_query(&records, &schema, &view);
    assert!(result.is_empty());
    assert!(result.groups.is_empty());
}

fn arb_records() -> impl Strategy<Value = Vec<NormalizedRecord>> {
    let value = prop_oneof![
        Just(Value::Null),
        "[a-cA-C ]{0,4}".prop_map(Value::from),
        (0u8..5).prop_map(|n| Value::Number(f64::from(n))),
    ];
    prop::collection::vec(
        (
            proptest::option::of(value.clone()),
            proptest::option::of(value),
        ),
        0..24,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(a, b)| {
                let mut record = NormalizedRecord::new();
                record.insert("Title", Value::from("t"));
                if let Some(a) = a {
                    record.insert("A", a);
                }
                if let Some(b) = b {
                    record.insert("B", b);
                }
                record
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn filter_conjunction_is_intersection(
        records in arb_records(),
        first in "[a-cA-C]{1,2}",
        second in "[a-cA-C0-4]{1,2}"
    ) {
        let schema = infer_schema(&records);

        let mut only_a = ViewState::default();
        only_a.set_filter("A", first.clone());
        let mut only_b = ViewState::default();
        only_b.set_filter("B", second.clone());
        let mut both = ViewState::default();
        both.set_filter("A", first);
        both.set_filter("B", second);

        let a_rows = run_query(&records, &schema, &only_a).rows;
        let b_rows = run_query(&records, &schema, &only_b).rows;
        let expected: Vec<usize> = a_rows.into_iter().filter(|row| b_rows.contains(row)).collect();
        prop_assert_eq!(run_query(&records, &schema, &both).rows, expected);
    }

    #[test]
    fn grouping_partitions_the_result(records in arb_records(), search in "[a-c]?") {
        let schema = infer_schema(&records);
        let mut view = ViewState::default();
        view.set_global_query(search);
        view.set_sort([SortKey::ascending("B")]);
        let flat = run_query(&records, &schema, &view);

        view.set_group_by(Some("A".into()));
        let grouped = run_query(&records, &schema, &view);
        prop_assert_eq!(&grouped.rows, &flat.rows);

        let mut seen: Vec<usize> = grouped.groups.iter().flat_map(|g| g.rows.clone()).collect();
        prop_assert_eq!(seen.len(), flat.rows.len());
        seen.sort_unstable();
        let mut expected = flat.rows.clone();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);

        for group in &grouped.groups {
            prop_assert!(!group.rows.is_empty());
            let order: Vec<usize> = flat.rows.iter().copied().filter(|row| group.rows.contains(row)).collect();
            prop_assert_eq!(&group.rows, &order);
        }
        let keys: Vec<&String> = grouped.groups.iter().map(|g| &g.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }
}
