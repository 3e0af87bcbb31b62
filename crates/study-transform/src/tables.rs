//! Field tables used by the normalizer.

/// Top-level fields copied through verbatim.
pub const PASSTHROUGH_FIELDS: [&str; 12] = [
    "index",
    "DOI",
    "Title",
    "Abstract",
    "NIHMS ID",
    "PMID",
    "PMCID",
    "EID",
    "Clinical Trial Numbers",
    "Comments",
    "LLM-tier",
    "URL",
];

/// Primary publication date.
pub const DATE_KEY: &str = "Date";

/// Fallback year supplied by the upstream dating step.
pub const TEMP_YEAR_KEY: &str = "temp_year";

/// Raw extraction output, flattened through [`EXTRACTED_RENAMES`].
pub const EXTRACTED_DATA_KEY: &str = "extracted_data";

/// Post-processed, list-shaped annotations, flattened through [`PROCESSED_RENAMES`].
pub const PROCESSED_DATA_KEY: &str = "processed_data";

/// Specialty list inside `processed_data`.
pub const SPECIALTIES_KEY: &str = "specialties";

pub const EXTRACTED_RENAMES: [(&str, &str); 14] = [
    ("models_used", "Models Used"),
    ("specialty", "Specialty (Extracted)"),
    ("subspecialty", "Subspecialty (Extracted)"),
    ("types_of_human_evaluators", "Human Evaluators (Extracted)"),
    ("quantitative?", "Quantitative?"),
    ("sample_size", "Sample Size"),
    ("task_type", "Task Type (Extracted)"),
    ("geographical_region", "Region"),
    ("evaluation_type(s)", "Evaluation Types (Extracted)"),
    ("evaluation_metric(s)", "Evaluation Metrics (Extracted)"),
    ("datasets_used", "Datasets Used"),
    ("types_of_data_sources", "Data Source Types"),
    ("did_the_llm_outperform_the_human?", "LLM Outperformed Human?"),
    ("extremely_brief_summary_of_results", "Results Summary"),
];

pub const PROCESSED_RENAMES: [(&str, &str); 6] = [
    ("model_categories", "Model Categories"),
    ("task_types", "Task Types"),
    ("evaluation_types", "Evaluation Types"),
    ("evaluation_metrics", "Evaluation Metrics"),
    ("human_evaluators", "Human Evaluators"),
    ("dataset_types", "Dataset Types"),
];
