//! Errors raised while storing or loading view state.
//!
//! Besides the `Display` text each error carries a short message for end
//! users and, where one exists, a hint on how to recover.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("view state {operation} failed for {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("view state could not be encoded")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// The blob stored under `key` is not a view state.
    #[error("stored view state under '{key}' is not valid")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The temporary file could not replace the target.
    #[error("could not move {temp_path} into place")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Message for people rather than logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {operation} the view state at {}", path.display()),
            Self::Serialization { .. } => "The view settings could not be saved.".to_string(),
            Self::Deserialization { key, .. } => {
                format!("The saved view settings under '{key}' could not be read.")
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not replace {}; the previous view state was kept.",
                target_path.display()
            ),
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("Check that the state folder is readable.".into())
            }
            Self::Io { .. } => Some("Check that the state folder is writable.".into()),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Run `study-browser view reset` to start from the default view.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or pass a different --state-dir.".into())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_suggestion_depends_on_operation() {
        let read = PersistenceError::io(
            "read",
            "/tmp/state.json",
            std::io::Error::other("denied"),
        );
        assert!(read.suggestion().unwrap().contains("readable"));
        assert_eq!(
            read.user_message(),
            "Could not read the view state at /tmp/state.json"
        );

        let write = PersistenceError::io(
            "write",
            "/tmp/state.json",
            std::io::Error::other("denied"),
        );
        assert!(write.suggestion().unwrap().contains("writable"));
    }

    #[test]
    fn deserialization_points_at_reset() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = PersistenceError::Deserialization {
            key: "study-browser-view-v5".into(),
            source,
        };
        assert!(error.user_message().contains("study-browser-view-v5"));
        assert!(error.suggestion().unwrap().contains("view reset"));
    }
}
