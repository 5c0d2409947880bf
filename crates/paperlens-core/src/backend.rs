use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("PDF is encrypted")]
    Encrypted,
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF parsing backends.
///
/// Implementors load a document from memory and report the text fragments of
/// each page; page selection and joining live in
/// [`crate::extractor::TextExtractor`].
pub trait PdfBackend: Send + Sync {
    /// Parse a PDF held in memory.
    fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError>;
}

/// A loaded PDF document.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text fragments of the page at zero-based `index`, in the order the
    /// backend reports them.
    fn page_fragments(&self, index: usize) -> Result<Vec<String>, BackendError>;
}
