//! Field names with special meaning across the workspace.

/// The record title. Always visible, never hideable.
pub const TITLE: &str = "Title";

/// Publication year derived during normalization.
pub const YEAR: &str = "Year";

pub const DOI: &str = "DOI";
pub const PMID: &str = "PMID";
pub const PMCID: &str = "PMCID";

pub const SPECIALTY: &str = "Specialty";
pub const SUBSPECIALTY: &str = "Subspecialty";

/// Row index carried over from the source export.
pub const INDEX: &str = "index";

/// Marker in field names produced from raw extraction output.
pub const EXTRACTED_MARKER: &str = "(Extracted)";

/// Group key used for records whose group-by value is null or empty.
pub const BLANK_GROUP_KEY: &str = "(blank)";
