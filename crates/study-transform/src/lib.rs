//! Study record normalization.
//!
//! This crate turns arbitrarily nested study descriptions into flat
//! [`NormalizedRecord`](study_model::NormalizedRecord)s:
//!
//! - **tables**: passthrough allow-list and the rename tables for the
//!   `extracted_data` / `processed_data` sub-structures
//! - **year**: publication year derivation from `Date` / `temp_year`
//! - **specialties**: specialty / subspecialty set extraction
//! - **normalize**: the [`Normalizer`] tying them together

pub mod normalize;
pub mod specialties;
pub mod tables;
pub mod year;

pub use normalize::{Normalizer, normalize, normalize_all};
pub use specialties::{SpecialtySets, collect_specialties};
pub use year::{MAX_YEAR, MIN_YEAR, derive_year, scan_year, year_from_text, year_from_value};
