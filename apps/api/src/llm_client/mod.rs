//! LLM Client: the single point of entry for all Gemini API calls in the service.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All extraction requests MUST go through this module.
//!
//! One request per extraction, no retry loop: an upstream failure surfaces to the
//! caller immediately.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use crate::llm_client::prompts::build_extraction_prompt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI service returned no candidate text")]
    EmptyCandidate,

    #[error("AI service reply is not a generateContent response: {0}")]
    UnreadableResponse(#[source] serde_json::Error),
}

/// Turns raw resume text into the AI service's raw response text.
///
/// Carried in `AppState` as `Arc<dyn ResumeExtractor>` so the upload pipeline does not
/// care which backend answers.
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, raw_text: &str) -> Result<String, ExtractionError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if it has any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Makes exactly one call to the Gemini API and returns the parsed response.
    pub async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ExtractionError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Gemini API returned {status} with an unreadable body: {e}");
            ExtractionError::UnreadableResponse(e)
        })?;
        debug!(
            "Gemini call succeeded: {} candidate(s)",
            parsed.candidates.len()
        );
        Ok(parsed)
    }
}

#[async_trait]
impl ResumeExtractor for GeminiClient {
    async fn extract(&self, raw_text: &str) -> Result<String, ExtractionError> {
        let prompt = build_extraction_prompt(raw_text);
        let response = self.generate(&prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(ExtractionError::EmptyCandidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_text_reads_first_candidate_part() {
        let r = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":\"A\"}"},{"text":"ignored"}]}}]}"#,
        );
        assert_eq!(r.text(), Some("{\"name\":\"A\"}"));
    }

    #[test]
    fn test_text_missing_candidates() {
        assert_eq!(response("{}").text(), None);
        assert_eq!(response(r#"{"candidates":[]}"#).text(), None);
    }

    #[test]
    fn test_text_missing_parts_or_text() {
        assert_eq!(response(r#"{"candidates":[{}]}"#).text(), None);
        assert_eq!(response(r#"{"candidates":[{"content":{"parts":[]}}]}"#).text(), None);
        assert_eq!(
            response(r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#).text(),
            None
        );
    }

    #[test]
    fn test_text_empty_string_is_no_candidate() {
        let r = response(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(r.text(), None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"contents":[{"role":"user","parts":[{"text":"hello"}]}]})
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            "k".to_string(),
            DEFAULT_MODEL.to_string(),
            format!("{DEFAULT_BASE_URL}/"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    /// Serves `body` with status 200 for every request; returns the base URL.
    async fn stub_service(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().fallback(move || async move { body });
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> GeminiClient {
        GeminiClient::new(
            "k".to_string(),
            DEFAULT_MODEL.to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_extract_returns_candidate_text() {
        let base =
            stub_service(r#"{"candidates":[{"content":{"parts":[{"text":"{\"name\":\"A\"}"}]}}]}"#)
                .await;
        let text = client_for(base).extract("resume").await.unwrap();
        assert_eq!(text, r#"{"name":"A"}"#);
    }

    #[tokio::test]
    async fn test_success_status_with_unreadable_body() {
        for body in ["<html>hello</html>", r#"{"candidates":"oops"}"#] {
            let base = stub_service(body).await;
            let err = client_for(base).extract("resume").await.unwrap_err();
            assert!(
                matches!(err, ExtractionError::UnreadableResponse(_)),
                "{body}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let client = GeminiClient::new(
            "k".to_string(),
            DEFAULT_MODEL.to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.extract("resume").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Http(_)));
    }
}
