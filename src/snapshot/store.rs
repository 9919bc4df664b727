//! Snapshot files on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use crate::error_handling::SnapshotError;

/// Directory of `<canonical-domain>.json` snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store rooted at `dir`. Nothing is touched on disk yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the snapshot file for a canonical domain.
    pub fn path_for(&self, canonical: &str) -> PathBuf {
        self.dir.join(format!("{canonical}.json"))
    }

    /// Loads the previous snapshot document, if there is one.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the file exists but cannot be read and
    /// `SnapshotError::Json` if it is not valid JSON.
    pub fn load(&self, canonical: &str) -> Result<Option<Value>, SnapshotError> {
        let path = self.path_for(canonical);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes a rendered snapshot, creating the directory when needed.
    ///
    /// # Returns
    ///
    /// The path that was written.
    pub fn write(&self, canonical: &str, json: &str) -> Result<PathBuf, SnapshotError> {
        fs::create_dir_all(&self.dir).map_err(|source| SnapshotError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(canonical);
        fs::write(&path, json).map_err(|source| SnapshotError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
