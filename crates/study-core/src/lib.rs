//! Study browser core: schema inference, the query engine, detail views
//! and the stateful browsing session.

pub mod detail;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod session;

pub use detail::{AnswerTone, DetailEntry, DetailValue, DetailView, FALLBACK_TITLE, identifier_link};
pub use error::{CoreError, Result};
pub use pipeline::{Dataset, load_dataset};
pub use query::{group_key, run_query};
pub use schema::{
    GROUP_BY_CANDIDATES, HEADLINE_FIELDS, group_by_candidates, infer_kind, infer_schema,
    is_hidden_everywhere, parse_numeric_text,
};
pub use session::Session;
