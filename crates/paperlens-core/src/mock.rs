//! Hand-rolled fakes for the two external collaborators, used by tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::backend::{BackendError, PdfBackend, PdfDocument};
use crate::service::{GenerateRequest, GenerativeService, ServiceError};

/// A configurable response for [`MockService`].
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    Error(ServiceError),
}

/// A [`GenerativeService`] that returns a fixed reply.
///
/// Supports optional per-call latency, call counting, and capture of the
/// last request sent.
pub struct MockService {
    reply: MockReply,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockService {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay: None,
            call_count: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn failing(error: ServiceError) -> Self {
        Self::new(MockReply::Error(error))
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `generate()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl GenerativeService for MockService {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, ServiceError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());
        let reply = self.reply.clone();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match reply {
                MockReply::Text(text) => Ok(text),
                MockReply::Error(err) => Err(err),
            }
        })
    }
}

/// An in-memory [`PdfBackend`] whose pages are lists of text fragments.
///
/// Clones share call records, so a test can keep a handle after giving the
/// backend to an extractor.
#[derive(Clone, Default)]
pub struct FakePdf {
    pages: Arc<Vec<Vec<String>>>,
    fail_open: bool,
    fail_page: Option<usize>,
    open_count: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<usize>>>,
}

impl FakePdf {
    pub fn new(pages: Vec<Vec<String>>) -> Self {
        Self {
            pages: Arc::new(pages),
            ..Self::default()
        }
    }

    pub fn with_pages(pages: Vec<Vec<&str>>) -> Self {
        Self::new(
            pages
                .into_iter()
                .map(|p| p.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    /// A backend that cannot parse anything.
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::default()
        }
    }

    /// Fail when the page at zero-based `index` is read.
    pub fn failing_at_page(mut self, index: usize) -> Self {
        self.fail_page = Some(index);
        self
    }

    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// Zero-based indices of the pages read so far, in order.
    pub fn pages_requested(&self) -> Vec<usize> {
        self.requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl PdfBackend for FakePdf {
    fn open<'a>(&'a self, _data: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_open {
            return Err(BackendError::OpenError("no objects found".into()));
        }
        Ok(Box::new(FakeDocument { pdf: self }))
    }
}

struct FakeDocument<'a> {
    pdf: &'a FakePdf,
}

impl PdfDocument for FakeDocument<'_> {
    fn page_count(&self) -> usize {
        self.pdf.pages.len()
    }

    fn page_fragments(&self, index: usize) -> Result<Vec<String>, BackendError> {
        self.pdf
            .requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(index);
        if self.pdf.fail_page == Some(index) {
            return Err(BackendError::ExtractionError(format!(
                "bad content stream on page {}",
                index + 1
            )));
        }
        self.pdf
            .pages
            .get(index)
            .cloned()
            .ok_or_else(|| BackendError::ExtractionError(format!("no page {}", index + 1)))
    }
}
