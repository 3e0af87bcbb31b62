//! View-state persistence through the file store.

use std::fs;

use study_model::{Density, SortKey, ViewState};
use study_persistence::{
    FileStore, KeyValueStore, LEGACY_STATE_KEYS, STATE_KEY, ViewStateStore,
};
use tempfile::tempdir;

#[test]
fn state_survives_a_new_store_instance() {
    let dir = tempdir().unwrap();

    let mut state = ViewState::default();
    state.set_global_query("radiology");
    state.set_sort([SortKey::ascending("Year"), SortKey::descending("Title")]);
    state.set_group_by(Some("Specialty".into()));
    state.set_column_visible("Abstract", false);

    let mut store = ViewStateStore::new(FileStore::new(dir.path()));
    store.save(&state).unwrap();

    let reopened = ViewStateStore::new(FileStore::new(dir.path()));
    assert_eq!(reopened.load(), state);
}

#[test]
fn stored_blob_uses_camel_case_keys() {
    let dir = tempdir().unwrap();
    let mut store = ViewStateStore::new(FileStore::new(dir.path()));
    let mut state = ViewState::default();
    state.set_sort([SortKey::descending("Year")]);
    store.save(&state).unwrap();

    let text = fs::read_to_string(dir.path().join(format!("{STATE_KEY}.json"))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["sort"][0]["dir"], "desc");
    assert!(json.get("visibleColumns").is_some());
    assert!(json.get("globalQuery").is_some());
    assert_eq!(json["density"], "compact");
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(format!("{STATE_KEY}.json")), "{\"sort\": 5").unwrap();
    let store = ViewStateStore::new(FileStore::new(dir.path()));
    assert_eq!(store.load(), ViewState::default());
}

#[test]
fn reset_removes_state_files() {
    let dir = tempdir().unwrap();
    let mut files = FileStore::new(dir.path());
    files.set(LEGACY_STATE_KEYS[0], "{}").unwrap();

    let mut store = ViewStateStore::new(files);
    let mut state = ViewState::default();
    state.set_density(Density::Comfortable);
    store.save(&state).unwrap();

    assert_eq!(store.reset().unwrap(), ViewState::default());
    assert_eq!(store.store().get(STATE_KEY).unwrap(), None);
    assert_eq!(store.store().get(LEGACY_STATE_KEYS[0]).unwrap(), None);
    assert_eq!(store.load(), ViewState::default());
}
