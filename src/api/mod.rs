//! Gemini API client: wire types for `generateContent` and the completion
//! call used by the chat loop.
//!
//! One request per user turn, awaited as a single unit. No streaming, no
//! retries, no timeout beyond what the transport imposes.

use std::fmt;

use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize)]
pub struct ApiError {
    pub code: Option<u32>,
    pub message: Option<String>,
}

impl GenerateRequest {
    /// Single-turn prompt, the only request shape this client sends.
    pub fn from_prompt(prompt: &str) -> Self {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any.
    pub fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// A completion call that could not produce text. Recovered at the call
/// site: shown inline, never propagated as a crash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request never completed (connection, TLS, DNS...).
    Transport(String),
    /// The service answered with an error status or an error payload.
    Api { status: u16, message: String },
    /// A successful response that carried no candidate text.
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Transport(message) => write!(f, "{message}"),
            GenerationError::Api { status, message } => {
                write!(f, "{message} (HTTP {status})")
            }
            GenerationError::EmptyResponse => write!(f, "the model returned no text"),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(GeminiClient {
            client,
            api_key,
            model,
            base_url,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and await the full reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "generateContent request failed");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::Api {
                status: status.as_u16(),
                message: format!("unexpected response body: {e}"),
            }
        })?;

        // Some failures come back with a 200 and an error object in the body.
        if let Some(error) = parsed.error {
            return Err(GenerationError::Api {
                status: error.code.unwrap_or(status.as_u16() as u32) as u16,
                message: error
                    .message
                    .unwrap_or_else(|| "unknown API error".to_string()),
            });
        }

        match parsed.first_candidate_text() {
            Some(text) => {
                tracing::debug!(chars = text.len(), "generateContent request succeeded");
                Ok(text)
            }
            None => Err(GenerationError::EmptyResponse),
        }
    }
}

/// Pull the API's own message out of an error body, falling back to the raw
/// body when it is not the documented JSON shape.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: Option<ApiError>,
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.and_then(|e| e.message) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed with no error detail".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_v1beta_shape() {
        let request = GenerateRequest::from_prompt("Hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "Hello"}]}
                ]
            })
        );
    }

    #[test]
    fn candidate_text_concatenates_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hi "}, {"text": "there"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_candidate_text().as_deref(), Some("Hi there"));
    }

    #[test]
    fn missing_candidates_yield_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_candidate_text().is_none());
    }

    #[test]
    fn candidate_without_content_yields_no_text() {
        let body = r#"{"candidates": [{}]}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert!(response.first_candidate_text().is_none());
    }

    #[test]
    fn error_body_message_is_preferred() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded"}}"#;
        assert_eq!(api_error_message(body), "Quota exceeded");
    }

    #[test]
    fn non_json_error_body_falls_back_to_raw_text() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn empty_error_body_gets_a_placeholder() {
        assert_eq!(
            api_error_message("   "),
            "request failed with no error detail"
        );
    }

    #[test]
    fn error_display_includes_status() {
        let error = GenerationError::Api {
            status: 429,
            message: "Quota exceeded".to_string(),
        };
        assert_eq!(error.to_string(), "Quota exceeded (HTTP 429)");
    }

    #[test]
    fn embedded_error_object_maps_to_api_error() {
        let body = r#"{"error": {"code": 403, "message": "API key invalid"}}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let error = parsed.error.expect("error object should parse");
        assert_eq!(error.code, Some(403));
        assert_eq!(error.message.as_deref(), Some("API key invalid"));
    }
}
