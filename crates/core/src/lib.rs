//! # Syllabus Core
//!
//! Domain types, traits, and error definitions for the Syllabus grounded
//! study engine. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external boundary (generation provider, snapshot storage, sign-in,
//! ingestion) is a trait here. Implementations live in their respective
//! crates, so tests can swap in scripted stand-ins and the dependency graph
//! points inward.

pub mod collaborator;
pub mod error;
pub mod message;
pub mod notebook;
pub mod provider;
pub mod snapshot;

// Re-export key types at crate root for ergonomics
pub use collaborator::{Authenticator, Ingestor, RawFile, User};
pub use error::{
    AuthError, Error, IngestError, ProviderError, Result, StorageError, ValidationError,
};
pub use message::{Citation, Message, Role, StudyArtifact};
pub use notebook::{Document, DocumentKind, DocumentStatus, Notebook, Subject};
pub use provider::{GenerationRequest, GenerationResponse, Provider, Turn, TurnRole};
pub use snapshot::SnapshotBackend;
