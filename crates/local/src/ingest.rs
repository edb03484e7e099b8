//! Plain-text ingestion.
//!
//! Accepts UTF-8 text (`txt`, `md`, pasted text). Binary formats (`pdf`,
//! `docx`) are rejected as unsupported; there is no extraction backend for
//! them. A batch is all-or-nothing: one bad file fails the whole call.

use std::path::Path;

use async_trait::async_trait;
use syllabus_core::collaborator::{Ingestor, RawFile};
use syllabus_core::error::IngestError;
use syllabus_core::notebook::{Document, DocumentKind};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextIngestor;

impl PlainTextIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Build a document from text pasted directly by the user.
    pub fn paste(name: impl Into<String>, text: impl Into<String>) -> Result<Document, IngestError> {
        let name = name.into();
        let text = text.into();
        if text.trim().is_empty() {
            return Err(IngestError::ExtractionFailed {
                name,
                reason: "pasted text is empty".into(),
            });
        }
        let bytes = text.len() as u64;
        Ok(Document::new(name, DocumentKind::Paste, text, bytes))
    }

    fn extract(file: RawFile) -> Result<Document, IngestError> {
        let kind = DocumentKind::from_file_name(&file.name);
        if matches!(kind, DocumentKind::Pdf | DocumentKind::Docx) {
            return Err(IngestError::Unsupported {
                name: file.name,
                reason: format!("{} text extraction is not available", kind.as_str()),
            });
        }

        let bytes = file.bytes.len() as u64;
        let content = String::from_utf8(file.bytes).map_err(|e| IngestError::ExtractionFailed {
            name: file.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Document::new(file.name, kind, content, bytes))
    }
}

#[async_trait]
impl Ingestor for PlainTextIngestor {
    fn name(&self) -> &str {
        "plain_text"
    }

    async fn ingest(&self, files: Vec<RawFile>) -> Result<Vec<Document>, IngestError> {
        if files.is_empty() {
            return Err(IngestError::Empty);
        }
        let documents = files
            .into_iter()
            .map(Self::extract)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = documents.len(), "Ingested documents");
        Ok(documents)
    }
}

/// Read files from disk into raw blobs named by their file name.
pub async fn read_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawFile>, IngestError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| IngestError::ExtractionFailed {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        files.push(RawFile::new(name, bytes));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::notebook::DocumentStatus;

    #[tokio::test]
    async fn text_files_become_ready_documents_in_order() {
        let files = vec![
            RawFile::new("unit1.md", "# Unit 1\nSets"),
            RawFile::new("syllabus.txt", "Week 1: Relations"),
        ];
        let docs = PlainTextIngestor::new().ingest(files).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].name, "unit1.md");
        assert_eq!(docs[0].kind, DocumentKind::Md);
        assert_eq!(docs[1].kind, DocumentKind::Txt);
        assert_eq!(docs[1].content, "Week 1: Relations");
        assert!(docs.iter().all(|d| d.status == DocumentStatus::Ready));
        assert_ne!(docs[0].id, docs[1].id);
    }

    #[tokio::test]
    async fn binary_formats_unsupported() {
        let err = PlainTextIngestor::new()
            .ingest(vec![RawFile::new("a.txt", "ok"), RawFile::new("Slides.PDF", vec![0x25, 0x50])])
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Unsupported { name, .. } if name == "Slides.PDF"));
    }

    #[tokio::test]
    async fn invalid_utf8_fails_extraction() {
        let err = PlainTextIngestor::new()
            .ingest(vec![RawFile::new("notes.txt", vec![0xff, 0xfe, 0x00])])
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::ExtractionFailed { .. }));
    }

    #[tokio::test]
    async fn empty_batch_rejected() {
        let err = PlainTextIngestor::new().ingest(Vec::new()).await.unwrap_err();
        assert!(matches!(err, IngestError::Empty));
    }

    #[test]
    fn paste_documents() {
        let doc = PlainTextIngestor::paste("Lecture notes", "B-trees keep keys sorted").unwrap();
        assert_eq!(doc.kind, DocumentKind::Paste);
        assert!(PlainTextIngestor::paste("blank", "  ").is_err());
    }

    #[tokio::test]
    async fn read_files_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("os.md");
        std::fs::write(&path, "Scheduling").unwrap();

        let files = read_files(&[&path]).await.unwrap();
        assert_eq!(files[0].name, "os.md");
        assert_eq!(files[0].bytes, b"Scheduling");

        let missing = read_files(&[dir.path().join("nope.txt")]).await;
        assert!(matches!(missing, Err(IngestError::ExtractionFailed { .. })));
    }
}
