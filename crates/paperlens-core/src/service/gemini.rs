use std::future::Future;
use std::pin::Pin;

use serde_json::{Value, json};

use super::{GenerateRequest, GenerativeService, ServiceError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini `generateContent` over HTTPS.
pub struct GeminiService {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl std::fmt::Debug for GeminiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiService")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiService {
    /// A missing or blank key is not rejected here; requests fail with
    /// [`ServiceError::MissingApiKey`] instead.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

impl GenerativeService for GeminiService {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn generate<'a>(
        &'a self,
        request: &'a GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, ServiceError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self.api_key.as_deref().ok_or(ServiceError::MissingApiKey)?;

            let resp = self
                .client
                .post(self.endpoint(&request.model))
                .header("x-goog-api-key", api_key)
                .json(&request_body(request))
                .send()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))?;

            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| ServiceError::Transport(e.to_string()))?;

            if !status.is_success() {
                return Err(ServiceError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body)
                        .unwrap_or_else(|| format!("HTTP {}", status)),
                });
            }

            // A body that is not JSON at all yields no text, which the
            // analysis client reports as a processing error.
            let data: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            Ok(response_text(&data))
        })
    }
}

/// JSON body for a `generateContent` call.
pub fn request_body(request: &GenerateRequest) -> Value {
    json!({
        "contents": [
            { "role": "user", "parts": [{ "text": request.prompt }] }
        ],
        "systemInstruction": {
            "parts": [{ "text": request.system_instruction }]
        },
        "generationConfig": {
            "responseMimeType": request.response_mime_type,
            "responseSchema": request.response_schema,
        }
    })
}

/// Concatenated text parts of the first candidate; empty if there is none.
pub fn response_text(data: &Value) -> String {
    data["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// `error.message` from a Gemini error body, if present.
pub fn api_error_message(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;
    data["error"]["message"]
        .as_str()
        .filter(|m| !m.is_empty())
        .map(String::from)
}
