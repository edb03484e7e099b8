//! In-memory snapshot backend. Nothing survives the process; used by tests
//! and ephemeral workspaces.

use std::collections::HashMap;
use std::sync::RwLock;

use syllabus_core::error::StorageError;
use syllabus_core::snapshot::SnapshotBackend;

#[derive(Default)]
pub struct InMemorySnapshotBackend {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, e.g. to simulate a snapshot left by a previous run.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let backend = Self::new();
        backend
            .values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.into(), value.into());
        backend
    }
}

impl SnapshotBackend for InMemorySnapshotBackend {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
