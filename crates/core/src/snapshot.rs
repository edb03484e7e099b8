//! Snapshot backend trait — key-addressed durable storage.
//!
//! The workspace is persisted as one serialized document under one fixed key.
//! Backends only move bytes; serialization and invariants belong to the store.
//! Calls are synchronous: a write either lands before the mutation returns or
//! the mutation fails.

use crate::error::StorageError;

pub trait SnapshotBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Read the value stored under `key`. `Ok(None)` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key` in full.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
