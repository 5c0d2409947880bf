use std::sync::Arc;

use crate::backend::{BackendError, PdfBackend};
use crate::ExtractedText;

/// Pages past this one are never read.
pub const MAX_PAGES: usize = 30;

/// Turns PDF bytes into plain text using an injected [`PdfBackend`].
///
/// Each page's fragments are joined with a single space; pages are joined
/// with a newline, in ascending order. No layout or column reconstruction is
/// attempted. Any backend error fails the whole extraction.
#[derive(Clone)]
pub struct TextExtractor {
    backend: Arc<dyn PdfBackend>,
}

impl TextExtractor {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    pub fn extract(&self, data: &[u8]) -> Result<ExtractedText, BackendError> {
        let document = self.backend.open(data)?;
        let total_pages = document.page_count();
        let pages_read = total_pages.min(MAX_PAGES);

        let mut pages = Vec::with_capacity(pages_read);
        for index in 0..pages_read {
            let fragments = document.page_fragments(index)?;
            pages.push(fragments.join(" "));
        }

        tracing::debug!(total_pages, pages_read, "extracted PDF text");

        Ok(ExtractedText {
            text: pages.join("\n"),
            pages_read,
            total_pages,
        })
    }

    /// Run [`extract`](Self::extract) on tokio's blocking pool.
    pub async fn extract_blocking(&self, data: Vec<u8>) -> Result<ExtractedText, BackendError> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&data))
            .await
            .map_err(|e| BackendError::ExtractionError(format!("extraction task failed: {}", e)))?
    }
}
