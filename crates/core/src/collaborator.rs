//! Collaborator boundaries: sign-in and document ingestion.
//!
//! The engine never authenticates or parses raw files itself. It consumes the
//! finished records these traits return. Both operations suspend and may fail
//! on their own error channel; callers must not assume any fixed latency.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, IngestError};
use crate::notebook::Document;

/// The signed-in user. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A raw uploaded file, before text extraction.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    fn name(&self) -> &str;

    /// Run the external sign-in flow and return the resulting identity.
    async fn authenticate(&self) -> Result<User, AuthError>;
}

#[async_trait]
pub trait Ingestor: Send + Sync {
    fn name(&self) -> &str;

    /// Extract text from each file. Returns one `Document` per input file, in input order.
    async fn ingest(&self, files: Vec<RawFile>) -> Result<Vec<Document>, IngestError>;
}
