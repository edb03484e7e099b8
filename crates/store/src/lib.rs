//! Workspace persistence for Syllabus.
//!
//! `WorkspaceStore` owns the notebook collection; snapshot backends decide
//! where the serialized snapshot lives.

pub mod file;
pub mod in_memory;
pub mod workspace;

pub use file::FileSnapshotBackend;
pub use in_memory::InMemorySnapshotBackend;
pub use workspace::{SNAPSHOT_KEY, WorkspaceStore};
