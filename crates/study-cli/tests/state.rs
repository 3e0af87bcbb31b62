//! Tests for view-state location handling.

use std::path::Path;

use study_cli::state::{FALLBACK_STATE_DIR, StateLocation, default_state_dir};
use study_model::{Density, ViewState};
use study_persistence::ViewStateStore;

#[test]
fn directory_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let location = StateLocation::resolve(Some(dir.path()), false);

    let mut store = ViewStateStore::new(location.open());
    let mut view = ViewState::default();
    view.set_filter("Year", "2021");
    view.set_density(Density::Comfortable);
    store.save(&view).unwrap();

    let reopened = ViewStateStore::new(location.open());
    assert_eq!(reopened.load(), view);
}

#[test]
fn memory_state_is_not_shared_between_opens() {
    let location = StateLocation::resolve(None, true);
    let mut store = ViewStateStore::new(location.open());
    let mut view = ViewState::default();
    view.set_global_query("oncology");
    store.save(&view).unwrap();

    let reopened = ViewStateStore::new(location.open());
    assert_eq!(reopened.load(), ViewState::default());
}

#[test]
fn default_directory_is_used_without_flags() {
    let location = StateLocation::resolve(None, false);
    let StateLocation::Directory(dir) = location else {
        panic!("expected a directory location");
    };
    assert_eq!(dir, default_state_dir());
    assert!(!dir.as_os_str().is_empty());
}

#[test]
fn fallback_directory_is_relative() {
    assert!(Path::new(FALLBACK_STATE_DIR).is_relative());
}
