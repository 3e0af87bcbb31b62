pub mod error;
pub mod jsonl;
pub mod reader;

pub use error::{IngestError, Result};
pub use jsonl::{IngestOutcome, SkippedLine, parse_jsonl};
pub use reader::{SourceFormat, detect_format, parse_records, read_records};
