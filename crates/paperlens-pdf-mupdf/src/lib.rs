use mupdf::{Document, TextPageFlags};

use paperlens_core::{BackendError, PdfBackend, PdfDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the rest of the workspace does not
/// transitively depend on it.
///
/// Each text line MuPDF reports on a page becomes one fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn open<'a>(&'a self, data: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError> {
        let document = Document::from_bytes(data, paperlens_core::PDF_MIME)
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::OpenError(e.to_string()))?
        {
            return Err(BackendError::Encrypted);
        }

        let page_count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        Ok(Box::new(MupdfDocument {
            document,
            page_count: usize::try_from(page_count).unwrap_or(0),
        }))
    }
}

struct MupdfDocument {
    document: Document,
    page_count: usize,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<String>, BackendError> {
        let page_no = i32::try_from(index)
            .map_err(|_| BackendError::ExtractionError(format!("page index {} out of range", index)))?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        let mut fragments = Vec::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                fragments.push(line_text);
            }
        }
        Ok(fragments)
    }
}
