//! File-based snapshot backend: one JSON file per key.
//!
//! Storage location: `<dir>/<key>.json`; the CLI roots it at the configured
//! data dir (`~/.syllabus/data` by default).
//!
//! Writes go to `<key>.json.tmp` first and are renamed over the target, so a
//! crash mid-write never leaves a truncated snapshot behind. A failed write
//! removes the temp file and leaves the previous snapshot as it was.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use syllabus_core::error::StorageError;
use syllabus_core::snapshot::SnapshotBackend;
use tracing::debug;

/// A directory-backed snapshot store.
pub struct FileSnapshotBackend {
    dir: PathBuf,
}

impl FileSnapshotBackend {
    /// Create a backend rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotBackend for FileSnapshotBackend {
    fn name(&self) -> &str {
        "file"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "Snapshot read");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };

        fs::create_dir_all(&self.dir)
            .map_err(|e| write_err(format!("Failed to create {}: {e}", self.dir.display())))?;

        let final_path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));

        if let Err(e) = fs::write(&tmp_path, value).and_then(|_| fs::rename(&tmp_path, &final_path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(format!("Failed to replace {}: {e}", final_path.display())));
        }

        debug!(path = %final_path.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }
}
