use tokio::sync::watch;

use crate::client::AnalysisClient;
use crate::extractor::TextExtractor;
use crate::pipeline::{PipelineEvent, PipelineState, Status};
use crate::{UploadedDocument, messages};

/// What happened to a file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Declared type was not PDF. The state did not change.
    NotPdf,
    /// The controller was not idle, so the selection was ignored.
    Busy(Status),
    /// The run ended; carries the state it ended in.
    Finished(PipelineState),
}

impl SelectOutcome {
    /// Inline notice for the user, if the selection was refused.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SelectOutcome::NotPdf => Some(messages::NOT_A_PDF),
            _ => None,
        }
    }
}

/// Owns the pipeline state and sequences extraction then analysis.
///
/// The controller is the only writer of the state. Every transition goes
/// through [`PipelineState::reduce`] and replaces the value whole; readers
/// get snapshots via [`state`](Self::state) or follow changes through
/// [`subscribe`](Self::subscribe). Only one run can be in flight: the
/// `Idle -> Extracting` claim is atomic, and selections arriving in any
/// other state are ignored.
pub struct Controller {
    extractor: TextExtractor,
    client: AnalysisClient,
    state: watch::Sender<PipelineState>,
}

impl Controller {
    pub fn new(extractor: TextExtractor, client: AnalysisClient) -> Self {
        let (state, _) = watch::channel(PipelineState::Idle);
        Self {
            extractor,
            client,
            state,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Run the pipeline on a user-selected file.
    ///
    /// Returns once the run has reached `Completed` or `Error`, or
    /// immediately if the file was refused.
    pub async fn select_file(&self, file: UploadedDocument) -> SelectOutcome {
        if !file.is_pdf() {
            tracing::warn!(file = %file.filename, mime = %file.mime_type, "rejected non-PDF file");
            return SelectOutcome::NotPdf;
        }

        if self.apply(PipelineEvent::PdfSelected).is_none() {
            let status = self.status();
            tracing::warn!(file = %file.filename, %status, "ignored file selection while not idle");
            return SelectOutcome::Busy(status);
        }

        tracing::info!(file = %file.filename, bytes = file.data.len(), "pipeline run started");

        let extracted = match self.extractor.extract_blocking(file.data).await {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!(file = %file.filename, error = %e, "extraction failed");
                return self.finish(PipelineEvent::ExtractionFailed);
            }
        };
        tracing::info!(
            pages_read = extracted.pages_read,
            total_pages = extracted.total_pages,
            chars = extracted.text.chars().count(),
            "extraction complete"
        );
        self.apply(PipelineEvent::ExtractionSucceeded);

        let event = match self.client.analyze(extracted.as_str()).await {
            Ok(analysis) => PipelineEvent::AnalysisSucceeded(analysis),
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed");
                PipelineEvent::AnalysisFailed(Some(e.user_message()))
            }
        };
        self.finish(event)
    }

    /// Return to `Idle`, clearing any result or error.
    ///
    /// Returns `false` while a run is in flight; runs cannot be cancelled.
    pub fn reset(&self) -> bool {
        self.apply(PipelineEvent::Reset).is_some()
    }

    fn finish(&self, event: PipelineEvent) -> SelectOutcome {
        SelectOutcome::Finished(self.apply(event).unwrap_or_else(|| self.state()))
    }

    /// Apply one event; returns the new state if the event was accepted.
    fn apply(&self, event: PipelineEvent) -> Option<PipelineState> {
        let mut applied = None;
        self.state.send_if_modified(|state| {
            let Some(next) = state.reduce(event) else {
                return false;
            };
            tracing::debug!(from = %state.status(), to = %next.status(), "pipeline transition");
            applied = Some(next.clone());
            *state = next;
            true
        });
        applied
    }
}
