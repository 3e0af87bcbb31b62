use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown sort direction: {0} (expected asc or desc)")]
    UnknownSortDirection(String),
    #[error("invalid sort key: {0:?}")]
    InvalidSortKey(String),
    #[error("unknown density: {0} (expected compact or comfortable)")]
    UnknownDensity(String),
    #[error("invalid filter: {0:?} (expected FIELD=PATTERN)")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
