//! Explicit configuration values for store and export locations.
//!
//! # Invariants
//! - Nothing in core reads process-wide state for these paths; callers
//!   construct the values and pass them in.

use std::path::{Path, PathBuf};

/// Database file used when the caller does not provide one.
pub const DEFAULT_DB_FILE: &str = "notepad.sqlite";

/// Export directory used when the caller does not provide one.
pub const DEFAULT_EXPORT_DIR: &str = ".";

/// Location of the SQLite database backing a post store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}

/// Full application configuration: store plus text export directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotepadConfig {
    pub store: StoreConfig,
    pub export_dir: PathBuf,
}

impl NotepadConfig {
    pub fn new(db_path: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig::new(db_path),
            export_dir: export_dir.into(),
        }
    }
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE, DEFAULT_EXPORT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::{NotepadConfig, StoreConfig, DEFAULT_DB_FILE};
    use std::path::Path;

    #[test]
    fn defaults_point_at_local_notepad_file() {
        let config = NotepadConfig::default();
        assert_eq!(config.store.db_path(), Path::new(DEFAULT_DB_FILE));
        assert_eq!(config.export_dir, Path::new("."));
    }

    #[test]
    fn store_config_keeps_caller_path() {
        let config = StoreConfig::new("/tmp/other.sqlite");
        assert_eq!(config.db_path(), Path::new("/tmp/other.sqlite"));
    }
}
