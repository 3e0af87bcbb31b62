//! Debounce windows.

use serde::{Deserialize, Serialize};

/// Quiet periods applied to typed input before it reaches the view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Per-field filter input, in milliseconds.
    pub filter_ms: u64,

    /// Global search input, in milliseconds.
    pub search_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            filter_ms: 300,
            search_ms: 350,
        }
    }
}

impl DebounceConfig {
    /// Apply every input immediately.
    pub fn immediate() -> Self {
        Self {
            filter_ms: 0,
            search_ms: 0,
        }
    }
}
