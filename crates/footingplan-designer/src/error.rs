//! Error types for the designer crate.
//!
//! Layout and page fitting never fail; they report recoverable problems as
//! warnings next to their result. Only the export boundary has hard failures.

use std::io;
use thiserror::Error;

/// Errors that stop an export. Nothing is written when one is returned.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The composed document has nothing to export.
    #[error("Document has no root content")]
    MissingRoot,

    /// The composed document is not fit for serialization.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// No renderer is registered for the requested format.
    #[error("No renderer available for format: {0}")]
    RendererUnavailable(String),

    /// A renderer failed while serializing.
    #[error("Render failed: {0}")]
    Render(String),

    /// I/O error while writing the exported file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// True when the document itself was at fault rather than the output side.
    pub fn is_document_error(&self) -> bool {
        matches!(self, Self::MissingRoot | Self::MalformedDocument(_))
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
