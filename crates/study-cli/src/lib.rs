//! CLI library components for the study browser.

pub mod logging;
pub mod render;
pub mod state;
