//! Error types for the Syllabus domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the top-level [`Error`]
//! wraps them all.

use thiserror::Error;

/// The top-level error type for all Syllabus operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input rejected before any request is issued ---
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // --- Generation provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Persistence errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Collaborator errors ---
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Input rejected up front. Never surfaced as a generation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("No notebook is selected")]
    NoActiveNotebook,

    #[error("Notebook has no documents; upload material first")]
    NoDocuments,

    #[error("Busy: {0} already has a request in flight")]
    Busy(String),

    #[error("Notebook title is empty")]
    EmptyTitle,

    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Duplicate document id {document_id} in notebook {notebook_id}")]
    DuplicateDocument {
        notebook_id: String,
        document_id: String,
    },

    #[error("Session belongs to notebook {expected}, got {actual}")]
    NotebookMismatch { expected: String, actual: String },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// A generation call failed. Carries no retry hint: nothing in the engine retries.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Persistence read/write failure. Always surfaced to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read snapshot '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write snapshot '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("Snapshot '{key}' is malformed: {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Sign-in was cancelled")]
    Cancelled,

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Incomplete profile: {0}")]
    IncompleteProfile(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type for {name}: {reason}")]
    Unsupported { name: String, reason: String },

    #[error("Failed to extract text from {name}: {reason}")]
    ExtractionFailed { name: String, reason: String },

    #[error("No files given")]
    Empty,
}
