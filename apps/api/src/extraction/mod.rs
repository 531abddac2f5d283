//! Document extraction: turns uploaded bytes into raw text.
//!
//! PDF parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.
//! `AppState` holds an `Arc<dyn TextExtractor>` so handlers can be tested
//! without real PDF fixtures.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

/// Where a piece of raw text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Resume,
    JobDescription,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    #[error("the uploaded document is empty")]
    Empty,

    #[error("the uploaded document is not a PDF")]
    NotPdf,

    #[error("could not read text from PDF: {0}")]
    Pdf(String),

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, origin: DocumentOrigin, bytes: Bytes)
        -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Concatenates the text of every page.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(
        &self,
        origin: DocumentOrigin,
        bytes: Bytes,
    ) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }
        if !is_pdf(&bytes) {
            return Err(ExtractionError::NotPdf);
        }

        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        debug!(?origin, size, chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

/// True when the payload starts with the `%PDF-` magic bytes.
pub fn is_pdf(head: &[u8]) -> bool {
    head.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_checks_magic_bytes() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"PK\x03\x04"));
        assert!(!is_pdf(b""));
    }

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let err = PdfTextExtractor
            .extract(DocumentOrigin::Resume, Bytes::new())
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::Empty);
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let err = PdfTextExtractor
            .extract(DocumentOrigin::Resume, Bytes::from_static(b"plain text resume"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractionError::NotPdf);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_reports_failure() {
        let err = PdfTextExtractor
            .extract(
                DocumentOrigin::JobDescription,
                Bytes::from_static(b"%PDF-1.4\nnot really a pdf"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Pdf(_) | ExtractionError::Task(_)
        ));
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(
            ExtractionError::Pdf("bad xref".to_string()).to_string(),
            "could not read text from PDF: bad xref"
        );
    }
}
