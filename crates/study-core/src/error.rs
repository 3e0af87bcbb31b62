use thiserror::Error;

use study_ingest::IngestError;
use study_persistence::PersistenceError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("row {index} is out of range ({len} rows in the current result)")]
    RowOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
