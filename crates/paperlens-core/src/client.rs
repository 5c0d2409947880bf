use std::sync::Arc;

use crate::prompt;
use crate::service::{GenerateRequest, GenerativeService};
use crate::{AnalysisError, ResearchAnalysis};

/// At most this many characters of the paper are sent to the service.
pub const MAX_INPUT_CHARS: usize = 20_000;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Sends paper text to a [`GenerativeService`] and parses the six-field reply.
///
/// One call per invocation: no retry, no backoff, no timeout of its own.
#[derive(Clone)]
pub struct AnalysisClient {
    service: Arc<dyn GenerativeService>,
    model: String,
}

impl AnalysisClient {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self {
            service,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The request that [`analyze`](Self::analyze) would send for `text`.
    pub fn build_request(&self, text: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt::build_prompt(truncate_chars(text, MAX_INPUT_CHARS)),
            system_instruction: prompt::SYSTEM_INSTRUCTION.to_string(),
            response_schema: prompt::response_schema(),
            response_mime_type: prompt::RESPONSE_MIME_TYPE.to_string(),
        }
    }

    pub async fn analyze(&self, text: &str) -> Result<ResearchAnalysis, AnalysisError> {
        let request = self.build_request(text);
        tracing::debug!(
            service = self.service.name(),
            model = %self.model,
            input_chars = text.chars().count(),
            prompt_bytes = request.prompt.len(),
            "sending analysis request"
        );

        let raw = self.service.generate(&request).await?;
        let analysis = parse_analysis(&raw)?;

        let missing = analysis.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(?missing, "service reply left out schema fields");
        }
        Ok(analysis)
    }
}

/// Parse the raw service reply as one JSON document.
pub fn parse_analysis(raw: &str) -> Result<ResearchAnalysis, AnalysisError> {
    if raw.trim().is_empty() {
        return Err(AnalysisError::Parse("empty response".into()));
    }
    serde_json::from_str(raw).map_err(|e| {
        tracing::error!(error = %e, "failed to parse service reply");
        AnalysisError::Parse(e.to_string())
    })
}

/// Longest prefix of `text` holding at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
