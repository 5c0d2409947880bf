//! Generative text service trait and implementations.

pub mod gemini;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

pub use gemini::GeminiService;

/// One structured-output request to a generative text service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    /// Schema the reply must conform to.
    pub response_schema: Value,
    /// Response format directive, e.g. `application/json`.
    pub response_mime_type: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{}", crate::messages::MISSING_API_KEY)]
    MissingApiKey,
    /// Network-level failure; the message is passed through untouched.
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// A text-completion service that honours a response schema.
pub trait GenerativeService: Send + Sync {
    /// Human-readable service name for logs.
    fn name(&self) -> &str;

    /// Send the request and return the raw response text.
    fn generate<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, ServiceError>> + Send + 'a>>;
}
