//! Location and backing store of the persisted view state.
//!
//! State lives in the platform configuration folder:
//! - macOS: ~/Library/Application Support/org.StudyBrowser.study-browser/
//! - Windows: %APPDATA%/StudyBrowser/study-browser/config/
//! - Linux: ~/.config/study-browser/

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use study_persistence::{FileStore, KeyValueStore, MemoryStore};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "StudyBrowser";
const APP_NAME: &str = "study-browser";

/// Used when the platform folder cannot be determined.
pub const FALLBACK_STATE_DIR: &str = ".study-browser";

/// Platform state directory, or [`FALLBACK_STATE_DIR`].
pub fn default_state_dir() -> PathBuf {
    match ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME) {
        Some(dirs) => dirs.config_dir().to_path_buf(),
        None => {
            warn!("could not determine the configuration folder, using {FALLBACK_STATE_DIR}");
            PathBuf::from(FALLBACK_STATE_DIR)
        }
    }
}

/// Where view state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateLocation {
    Memory,
    Directory(PathBuf),
}

impl StateLocation {
    /// Resolve the location from the `--state-dir` and `--no-persist` flags.
    pub fn resolve(state_dir: Option<&Path>, no_persist: bool) -> Self {
        if no_persist {
            return Self::Memory;
        }
        Self::Directory(state_dir.map_or_else(default_state_dir, Path::to_path_buf))
    }

    pub fn open(&self) -> Box<dyn KeyValueStore> {
        match self {
            Self::Memory => {
                debug!("view state kept in memory");
                Box::new(MemoryStore::new())
            }
            Self::Directory(dir) => {
                debug!(dir = %dir.display(), "view state directory");
                Box::new(FileStore::new(dir))
            }
        }
    }
}
