//! Small file persistence helpers
//!
//! Features:
//! - Typed errors for the callers that want them
//! - Write to a temp file, then rename over the target
//! - Parent directories created on demand
//!
//! Game-facing code converts every error into a default plus a warning;
//! nothing here is ever shown to the player.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from loading or saving persisted data
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// Filesystem failure
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File existed but its contents made no sense
    #[error("Parse error in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_text(path: &Path) -> Result<String, PersistenceError> {
    fs::read_to_string(path).map_err(io_error(path))
}

/// Replace `path` with `contents` (tmp + rename so a crash never leaves a
/// half-written file)
pub fn write_text(path: &Path, contents: &str) -> Result<(), PersistenceError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(io_error(&tmp))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error(path)(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("value.txt");
        write_text(&path, "123").unwrap();
        assert_eq!(read_text(&path).unwrap(), "123");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_failed_rename_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocked");
        fs::create_dir(&path).unwrap();
        let err = write_text(&path, "7").unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert!(!dir.path().join("blocked.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }
}
