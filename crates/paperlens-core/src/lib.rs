use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod client;
pub mod config;
pub mod config_file;
pub mod controller;
pub mod extractor;
pub mod messages;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod pipeline;
pub mod prompt;
pub mod service;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use client::{AnalysisClient, MAX_INPUT_CHARS};
pub use config::Config;
pub use controller::{Controller, SelectOutcome};
pub use extractor::{MAX_PAGES, TextExtractor};
pub use pipeline::{PipelineEvent, PipelineState, StateSnapshot, Status};
pub use service::{GenerateRequest, GenerativeService, ServiceError};

/// The only MIME type the pipeline accepts.
pub const PDF_MIME: &str = "application/pdf";

/// A file handed to the pipeline by a front-end.
///
/// `mime_type` is whatever the front-end declared (file picker, multipart
/// header, or extension sniffing). The pipeline trusts it and does not look
/// at the bytes before extraction.
#[derive(Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME)
    }
}

impl std::fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("data", &format_args!("<{} bytes>", self.data.len()))
            .finish()
    }
}

/// Plain text pulled out of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    /// Pages actually read (at most [`MAX_PAGES`]).
    pub pages_read: usize,
    /// Page count reported by the document.
    pub total_pages: usize,
}

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether pages past the cap were left out.
    pub fn is_truncated(&self) -> bool {
        self.pages_read < self.total_pages
    }
}

/// Structured summary of a research paper.
///
/// Every field is mandatory in the schema sent to the service, but the reply
/// is not re-validated: a field the service left out stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl ResearchAnalysis {
    /// Names of the schema fields absent from this analysis.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.objectives.is_none() {
            missing.push("objectives");
        }
        if self.methodology.is_none() {
            missing.push("methodology");
        }
        if self.tools.is_none() {
            missing.push("tools");
        }
        if self.sample.is_none() {
            missing.push("sample");
        }
        if self.results.is_none() {
            missing.push("results");
        }
        if self.recommendations.is_none() {
            missing.push("recommendations");
        }
        missing
    }
}

/// Failure of the analysis stage.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("could not parse service response: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// The message shown to the user when this error ends a run.
    ///
    /// Service failures carry their own message; an empty one falls back to
    /// the generic message. Parse failures always use the fixed
    /// processing-error message.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Service(e) => {
                let message = e.to_string();
                if message.trim().is_empty() {
                    messages::UNEXPECTED_ERROR.to_string()
                } else {
                    message
                }
            }
            AnalysisError::Parse(_) => messages::PROCESSING_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_document_mime_check_is_case_insensitive() {
        let doc = UploadedDocument::new("a.pdf", "Application/PDF", vec![]);
        assert!(doc.is_pdf());
        let doc = UploadedDocument::new("a.txt", "text/plain", vec![]);
        assert!(!doc.is_pdf());
    }

    #[test]
    fn debug_hides_document_bytes() {
        let doc = UploadedDocument::new("a.pdf", PDF_MIME, vec![1, 2, 3]);
        let printed = format!("{:?}", doc);
        assert!(printed.contains("<3 bytes>"));
    }

    #[test]
    fn missing_field_deserializes_as_none() {
        let analysis: ResearchAnalysis =
            serde_json::from_str(r#"{"objectives": ["a"], "methodology": "m"}"#).unwrap();
        assert_eq!(analysis.objectives, Some(vec!["a".to_string()]));
        assert_eq!(
            analysis.missing_fields(),
            vec!["tools", "sample", "results", "recommendations"]
        );
    }

    #[test]
    fn service_error_without_message_falls_back() {
        let err = AnalysisError::Service(ServiceError::Transport(String::new()));
        assert_eq!(err.user_message(), messages::UNEXPECTED_ERROR);
    }

    #[test]
    fn parse_error_uses_processing_message() {
        let err = AnalysisError::Parse("EOF while parsing".into());
        assert_eq!(err.user_message(), messages::PROCESSING_ERROR);
    }
}
