//! The workspace store: the single owner of all notebooks.
//!
//! Every mutation builds the next notebook list, writes the full snapshot
//! through the backend, and only then commits it in memory. A failed write
//! leaves both the in-memory state and the previous snapshot untouched, and
//! the `StorageError` is returned to the caller.
//!
//! The active selection is session state: it is not part of the snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use syllabus_core::error::{Error, Result, StorageError, ValidationError};
use syllabus_core::notebook::{Document, Notebook, Subject};
use syllabus_core::snapshot::SnapshotBackend;
use tracing::{debug, info};

/// Fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "syllabusgpt_notebooks";

pub struct WorkspaceStore {
    backend: Arc<dyn SnapshotBackend>,
    notebooks: Vec<Notebook>,
    active: Option<String>,
}

impl std::fmt::Debug for WorkspaceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceStore")
            .field("backend", &self.backend.name())
            .field("notebooks", &self.notebooks.len())
            .field("active", &self.active)
            .finish()
    }
}

impl WorkspaceStore {
    /// Read the snapshot once. A missing snapshot is an empty workspace; a
    /// malformed one is an error, never silently discarded.
    pub fn load(backend: Arc<dyn SnapshotBackend>) -> std::result::Result<Self, StorageError> {
        let notebooks = match backend.read(SNAPSHOT_KEY)? {
            None => {
                info!(backend = backend.name(), "No workspace snapshot found, starting empty");
                Vec::new()
            }
            Some(raw) => decode_snapshot(&raw)?,
        };

        debug!(backend = backend.name(), count = notebooks.len(), "Workspace loaded");
        Ok(Self {
            backend,
            notebooks,
            active: None,
        })
    }

    /// All notebooks in creation order.
    pub fn list(&self) -> &[Notebook] {
        &self.notebooks
    }

    pub fn get(&self, id: &str) -> Option<&Notebook> {
        self.notebooks.iter().find(|n| n.id == id)
    }

    pub fn active(&self) -> Option<&Notebook> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn select(&mut self, id: &str) -> std::result::Result<&Notebook, ValidationError> {
        let index = self.index_of(id)?;
        self.active = Some(id.to_string());
        Ok(&self.notebooks[index])
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    /// Create an empty notebook and make it the active selection.
    pub fn create(&mut self, subject: Subject, title: &str) -> Result<Notebook> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let notebook = Notebook::new(subject, title);
        let mut next = self.notebooks.clone();
        next.push(notebook.clone());
        self.commit(next)?;

        self.active = Some(notebook.id.clone());
        info!(notebook_id = %notebook.id, subject = %subject, "Notebook created");
        Ok(notebook)
    }

    /// Replace the stored record with the same id, in full.
    pub fn update(&mut self, notebook: Notebook) -> Result<()> {
        let index = self.index_of(&notebook.id)?;
        if let Some(dup) = notebook.duplicate_document_id() {
            return Err(ValidationError::DuplicateDocument {
                notebook_id: notebook.id.clone(),
                document_id: dup.to_string(),
            }
            .into());
        }

        let mut next = self.notebooks.clone();
        next[index] = notebook;
        self.commit(next)
    }

    /// Remove a notebook. Callers obtain the user's confirmation first.
    /// Returns `false` when no notebook had that id (nothing is written).
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Ok(index) = self.index_of(id) else {
            return Ok(false);
        };

        let mut next = self.notebooks.clone();
        next.remove(index);
        self.commit(next)?;

        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        info!(notebook_id = %id, "Notebook deleted");
        Ok(true)
    }

    /// Append ingested documents to the end of a notebook, preserving their order.
    pub fn append_documents(&mut self, notebook_id: &str, documents: Vec<Document>) -> Result<Notebook> {
        let mut notebook = self.notebooks[self.index_of(notebook_id)?].clone();
        notebook.documents.extend(documents);
        self.update(notebook.clone())?;
        Ok(notebook)
    }

    pub fn remove_document(&mut self, notebook_id: &str, document_id: &str) -> Result<Notebook> {
        let mut notebook = self.notebooks[self.index_of(notebook_id)?].clone();
        let before = notebook.documents.len();
        notebook.documents.retain(|d| d.id != document_id);
        if notebook.documents.len() == before {
            return Err(ValidationError::DocumentNotFound(document_id.to_string()).into());
        }
        self.update(notebook.clone())?;
        Ok(notebook)
    }

    fn index_of(&self, id: &str) -> std::result::Result<usize, ValidationError> {
        self.notebooks
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ValidationError::NotebookNotFound(id.to_string()))
    }

    /// Write the full snapshot, then adopt it.
    fn commit(&mut self, next: Vec<Notebook>) -> Result<()> {
        let raw = serde_json::to_string(&next).map_err(Error::Serialization)?;
        self.backend.write(SNAPSHOT_KEY, &raw)?;
        debug!(count = next.len(), bytes = raw.len(), "Workspace snapshot committed");
        self.notebooks = next;
        Ok(())
    }
}

fn decode_snapshot(raw: &str) -> std::result::Result<Vec<Notebook>, StorageError> {
    let notebooks: Vec<Notebook> =
        serde_json::from_str(raw).map_err(|e| StorageError::Corrupt {
            key: SNAPSHOT_KEY.into(),
            reason: e.to_string(),
        })?;

    let mut seen = HashSet::new();
    for notebook in &notebooks {
        if !seen.insert(notebook.id.as_str()) {
            return Err(StorageError::Corrupt {
                key: SNAPSHOT_KEY.into(),
                reason: format!("duplicate notebook id {}", notebook.id),
            });
        }
        if let Some(dup) = notebook.duplicate_document_id() {
            return Err(StorageError::Corrupt {
                key: SNAPSHOT_KEY.into(),
                reason: format!("duplicate document id {dup} in notebook {}", notebook.id),
            });
        }
    }

    Ok(notebooks)
}
