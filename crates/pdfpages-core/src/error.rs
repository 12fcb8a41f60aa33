use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfPagesError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Please select at least {required} PDF files to merge (got {actual})")]
    NotEnoughDocuments { required: usize, actual: usize },

    #[error("Invalid page order: {0}")]
    InvalidOrder(String),

    #[error("Page index {index} does not exist (document has {page_count} pages)")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PdfPagesError {
    /// Whether this error comes from user input rather than document content
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PdfPagesError::NotEnoughDocuments { .. }
                | PdfPagesError::InvalidOrder(_)
                | PdfPagesError::PageOutOfRange { .. }
        )
    }
}
