//! The browsing session.
//!
//! A [`Session`] owns the records, their schema, the current view state,
//! the state store and the input debouncers. Every view mutation is saved
//! and the query result recomputed before the call returns.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, warn};

use study_model::{
    Density, NormalizedRecord, Payload, QueryResult, Schema, SortKey, ViewState,
};
use study_persistence::{Clock, DebounceConfig, Debouncer, KeyValueStore, ViewStateStore};

use crate::detail::DetailView;
use crate::error::{CoreError, Result};
use crate::query::run_query;
use crate::schema::infer_schema;

pub struct Session<S, C> {
    records: Vec<NormalizedRecord>,
    schema: Schema,
    view: ViewState,
    store: ViewStateStore<S>,
    result: QueryResult,
    clock: C,
    debounce: DebounceConfig,
    filter_input: BTreeMap<String, Debouncer<String, C>>,
    search_input: Debouncer<String, C>,
}

impl<S: KeyValueStore, C: Clock + Clone> Session<S, C> {
    /// Open a session over `records`, restoring the stored view state.
    pub fn new(records: Vec<NormalizedRecord>, store: S, clock: C) -> Self {
        let schema = infer_schema(&records);
        let store = ViewStateStore::new(store);
        let view = store.load();
        let result = run_query(&records, &schema, &view);
        let debounce = DebounceConfig::default();
        Self {
            search_input: Debouncer::new(debounce.search_ms, clock.clone()),
            records,
            schema,
            view,
            store,
            result,
            clock,
            debounce,
            filter_input: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = debounce;
        self.search_input = Debouncer::new(debounce.search_ms, self.clock.clone());
        self.filter_input.clear();
        self
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    pub fn store(&self) -> &S {
        self.store.store()
    }

    /// Records of the current result in display order.
    pub fn result_records(&self) -> Vec<&NormalizedRecord> {
        self.result.records(&self.records).collect()
    }

    pub fn payload(&self) -> Payload {
        Payload::new(self.records.clone(), &self.schema)
    }

    /// Set a per-field filter immediately.
    pub fn set_filter(&mut self, field: &str, pattern: impl Into<String>) -> Result<()> {
        self.require_listed(field)?;
        if let Some(pending) = self.filter_input.get_mut(field) {
            pending.cancel();
        }
        self.view.set_filter(field, pattern);
        self.commit(true);
        Ok(())
    }

    /// Set the global search immediately.
    pub fn set_global_query(&mut self, query: impl Into<String>) {
        self.search_input.cancel();
        self.view.set_global_query(query);
        self.commit(true);
    }

    /// Queue filter input; it is applied by [`tick`](Self::tick) once the
    /// field's input has been quiet for the filter window.
    pub fn type_filter(&mut self, field: &str, text: impl Into<String>) -> Result<()> {
        self.require_listed(field)?;
        let delay = self.debounce.filter_ms;
        let clock = &self.clock;
        self.filter_input
            .entry(field.to_string())
            .or_insert_with(|| Debouncer::new(delay, clock.clone()))
            .push(text.into());
        Ok(())
    }

    /// Queue global search input.
    pub fn type_global_query(&mut self, text: impl Into<String>) {
        self.search_input.push(text.into());
    }

    /// Apply every queued input whose quiet period has elapsed.
    ///
    /// Returns true when the view changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for (field, input) in &mut self.filter_input {
            if let Some(pattern) = input.poll() {
                self.view.set_filter(field.clone(), pattern);
                changed = true;
            }
        }
        if let Some(query) = self.search_input.poll() {
            self.view.set_global_query(query);
            changed = true;
        }
        if changed {
            self.commit(true);
        }
        changed
    }

    /// Apply every queued input now.
    pub fn flush(&mut self) -> bool {
        let mut changed = false;
        for (field, input) in &mut self.filter_input {
            if let Some(pattern) = input.flush() {
                self.view.set_filter(field.clone(), pattern);
                changed = true;
            }
        }
        if let Some(query) = self.search_input.flush() {
            self.view.set_global_query(query);
            changed = true;
        }
        if changed {
            self.commit(true);
        }
        changed
    }

    pub fn has_pending_input(&self) -> bool {
        self.search_input.is_pending() || self.filter_input.values().any(Debouncer::is_pending)
    }

    /// Clear per-field filters and the global search, pending input included.
    pub fn clear_filters(&mut self) {
        self.cancel_pending_input();
        self.view.clear_filters();
        self.commit(true);
    }

    /// Header-click sort cycling.
    pub fn toggle_sort(&mut self, field: &str, additive: bool) -> Result<()> {
        self.require_listed(field)?;
        self.view.toggle_sort(field, additive);
        self.commit(true);
        Ok(())
    }

    pub fn set_sort(&mut self, keys: Vec<SortKey>) -> Result<()> {
        for key in &keys {
            self.require_listed(&key.field)?;
        }
        self.view.set_sort(keys);
        self.commit(true);
        Ok(())
    }

    pub fn set_group_by(&mut self, field: Option<&str>) -> Result<()> {
        if let Some(field) = field {
            self.require_listed(field)?;
        }
        self.view.set_group_by(field.map(ToString::to_string));
        self.commit(true);
        Ok(())
    }

    /// Show or hide a column. Returns false when the change was refused.
    pub fn set_column_visible(&mut self, field: &str, visible: bool) -> Result<bool> {
        self.require_listed(field)?;
        let applied = self.view.set_column_visible(field, visible);
        if applied {
            self.commit(false);
        }
        Ok(applied)
    }

    pub fn set_density(&mut self, density: Density) {
        self.view.set_density(density);
        self.commit(false);
    }

    /// Purge the stored state and return to the defaults.
    pub fn reset(&mut self) -> Result<()> {
        self.cancel_pending_input();
        self.view = self.store.reset()?;
        self.recompute();
        Ok(())
    }

    /// Detail view of the record at `position` in the current result.
    pub fn detail(&self, position: usize) -> Result<DetailView> {
        let len = self.result.len();
        let record = self
            .result
            .rows
            .get(position)
            .and_then(|&index| self.records.get(index))
            .ok_or(CoreError::RowOutOfRange {
                index: position,
                len,
            })?;
        Ok(DetailView::build(record, &self.schema))
    }

    /// Detail view of a random record from the current result.
    pub fn random_detail<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<DetailView> {
        if self.result.is_empty() {
            return None;
        }
        let position = rng.random_range(0..self.result.len());
        self.detail(position).ok()
    }

    fn require_listed(&self, field: &str) -> Result<()> {
        if self.schema.position(field).is_some() {
            Ok(())
        } else {
            Err(CoreError::UnknownField(field.to_string()))
        }
    }

    fn cancel_pending_input(&mut self) {
        self.search_input.cancel();
        for input in self.filter_input.values_mut() {
            input.cancel();
        }
    }

    fn commit(&mut self, recompute: bool) {
        if let Err(error) = self.store.save(&self.view) {
            warn!(
                error = %error,
                suggestion = %error.suggestion().unwrap_or_default(),
                "failed to persist view state"
            );
        }
        if recompute {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.result = run_query(&self.records, &self.schema, &self.view);
        debug!(row_count = self.result.len(), "result updated");
    }
}
