//! Notebook and Document domain types.
//!
//! A notebook is a subject-tagged collection of ingested documents. It is the
//! unit the workspace persists and the source material every generation
//! request is grounded in.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// The closed set of subjects a notebook can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "DBMS")]
    Dbms,
    #[serde(rename = "Operating Systems")]
    OperatingSystems,
    #[serde(rename = "Computer Networks")]
    ComputerNetworks,
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "Other")]
    Other,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Dbms,
        Subject::OperatingSystems,
        Subject::ComputerNetworks,
        Subject::Ai,
        Subject::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Dbms => "DBMS",
            Subject::OperatingSystems => "Operating Systems",
            Subject::ComputerNetworks => "Computer Networks",
            Subject::Ai => "AI",
            Subject::Other => "Other",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = ValidationError;

    /// Accepts the display name or a short alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dbms" => Ok(Subject::Dbms),
            "operating systems" | "os" => Ok(Subject::OperatingSystems),
            "computer networks" | "cn" | "networks" => Ok(Subject::ComputerNetworks),
            "ai" => Ok(Subject::Ai),
            "other" => Ok(Subject::Other),
            _ => Err(ValidationError::UnknownVariant {
                kind: "subject",
                value: s.to_string(),
            }),
        }
    }
}

/// Source format of an ingested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
    Md,
    Paste,
}

impl DocumentKind {
    /// Infer the kind from a file name's extension. Unknown extensions map to `Txt`.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            "md" | "markdown" => DocumentKind::Md,
            _ => DocumentKind::Txt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
            DocumentKind::Md => "md",
            DocumentKind::Paste => "paste",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Ready,
    Processing,
}

/// One ingested, text-extracted study material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique within its notebook
    pub id: String,

    /// Original file name (used as the citation label)
    pub name: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    /// Extracted text. Opaque to the engine.
    pub content: String,

    /// Human-readable size, e.g. "1.2 KB"
    pub size: String,

    pub upload_date: DateTime<Utc>,

    pub status: DocumentStatus,
}

impl Document {
    /// Create a ready document with a fresh id.
    pub fn new(name: impl Into<String>, kind: DocumentKind, content: impl Into<String>, bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            content: content.into(),
            size: format_size(bytes),
            upload_date: Utc::now(),
            status: DocumentStatus::Ready,
        }
    }
}

/// A named, subject-tagged collection of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Unique within the workspace
    pub id: String,

    pub title: String,

    pub subject: Subject,

    /// Insertion order is significant: it is the order documents appear in context.
    #[serde(default)]
    pub documents: Vec<Document>,

    pub created_at: DateTime<Utc>,
}

impl Notebook {
    /// Create an empty notebook with a fresh id.
    pub fn new(subject: Subject, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            subject,
            documents: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }

    /// The first document id that appears more than once, if any.
    pub fn duplicate_document_id(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .find(|d| !seen.insert(d.id.as_str()))
            .map(|d| d.id.as_str())
    }
}

/// Format a byte count the way the materials list shows it: one decimal, KB.
pub fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
