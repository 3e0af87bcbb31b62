//! Loading, saving and resetting the persisted [`ViewState`].

use tracing::{debug, info, warn};

use study_model::ViewState;

use crate::error::{PersistenceError, Result};
use crate::store::KeyValueStore;

/// Current versioned key of the view-state blob.
pub const STATE_KEY: &str = "study-browser-view-v5";

/// Keys written by earlier versions; purged on reset.
pub const LEGACY_STATE_KEYS: [&str; 1] = ["tabulator-study-browser-v1"];

/// View-state persistence over any [`KeyValueStore`].
#[derive(Debug)]
pub struct ViewStateStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ViewStateStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: STATE_KEY.to_string(),
        }
    }

    /// Use a different key for the current state.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the stored state merged over the defaults.
    ///
    /// A missing, unreadable or undecodable blob yields the default state.
    pub fn load(&self) -> ViewState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(key = %self.key, "no stored view state, using defaults");
                ViewState::default()
            }
            Err(error) => {
                warn!(key = %self.key, error = %error, "ignoring stored view state");
                ViewState::default()
            }
        }
    }

    /// Like [`load`](Self::load) but reports why a stored blob was rejected.
    pub fn try_load(&self) -> Result<Option<ViewState>> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let mut state: ViewState =
            serde_json::from_str(&text).map_err(|source| PersistenceError::Deserialization {
                key: self.key.clone(),
                source,
            })?;
        state.sanitize();
        Ok(Some(state))
    }

    /// Persist the whole state under the current key.
    pub fn save(&mut self, state: &ViewState) -> Result<()> {
        let text = serde_json::to_string(state)
            .map_err(|source| PersistenceError::Serialization { source })?;
        self.store.set(&self.key, &text)?;
        debug!(key = %self.key, "view state saved");
        Ok(())
    }

    /// Remove the current and every legacy key and return the default state.
    pub fn reset(&mut self) -> Result<ViewState> {
        self.store.remove(&self.key)?;
        for legacy in LEGACY_STATE_KEYS {
            self.store.remove(legacy)?;
        }
        info!(key = %self.key, "view state reset");
        Ok(ViewState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use study_model::{Density, SortKey};

    #[test]
    fn missing_state_loads_defaults() {
        let store = ViewStateStore::new(MemoryStore::new());
        assert_eq!(store.load(), ViewState::default());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let mut store = ViewStateStore::new(MemoryStore::new());
        let mut state = ViewState::default();
        state.set_filter("Title", "cancer");
        state.set_sort([SortKey::descending("Year")]);
        state.set_density(Density::Comfortable);
        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
    }

    #[test]
    fn partial_blob_keeps_defaults() {
        let mut memory = MemoryStore::new();
        memory
            .set(STATE_KEY, r#"{"globalQ":"gpt","density":"cozy"}"#)
            .unwrap();
        let state = ViewStateStore::new(memory).load();
        assert_eq!(state.global_query, "gpt");
        assert_eq!(state.density, Density::Comfortable);
        assert!(state.sort.is_empty());
        assert!(state.filters.is_empty());
        assert_eq!(state.group_by, None);
    }

    #[test]
    fn garbage_blob_falls_back_to_defaults() {
        let mut memory = MemoryStore::new();
        memory.set(STATE_KEY, "not json").unwrap();
        let store = ViewStateStore::new(memory);
        assert_eq!(store.load(), ViewState::default());
        assert!(matches!(
            store.try_load(),
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn reset_purges_current_and_legacy_keys() {
        let mut memory = MemoryStore::new();
        memory.set(STATE_KEY, "{}").unwrap();
        memory.set(LEGACY_STATE_KEYS[0], "{}").unwrap();
        memory.set("unrelated", "keep").unwrap();

        let mut store = ViewStateStore::new(memory);
        assert_eq!(store.reset().unwrap(), ViewState::default());

        let memory = store.into_inner();
        assert_eq!(memory.get(STATE_KEY).unwrap(), None);
        assert_eq!(memory.get(LEGACY_STATE_KEYS[0]).unwrap(), None);
        assert_eq!(memory.get("unrelated").unwrap().as_deref(), Some("keep"));
    }
}
