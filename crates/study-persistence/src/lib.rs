//! Persistent view state for the study browser.
//!
//! # Features
//!
//! - **Key-value stores** behind a small trait: an in-memory store for tests
//!   and `--no-persist`, and a directory-backed file store
//! - **Atomic writes** (temp file + rename) in the file store
//! - **Versioned state key** with legacy keys purged on reset
//! - **Debounced input** driven by an injectable clock
//!
//! # Architecture
//!
//! - `store/` - `KeyValueStore` and its implementations
//! - `view_state.rs` - load/save/reset of [`ViewState`](study_model::ViewState)
//! - `debounce/` - `Debouncer`, clocks and debounce windows
//! - `error.rs` - Error types with user-friendly messages

mod debounce;
mod error;
mod store;
mod view_state;

pub use debounce::{Clock, DebounceConfig, Debouncer, ManualClock, SystemClock};
pub use error::{PersistenceError, Result};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use view_state::{LEGACY_STATE_KEYS, STATE_KEY, ViewStateStore};
