use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enrichment::normalizer::NormalizeError;
use crate::llm_client::ExtractionError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Bodies are `{"error": "..."}`, plus `"details"` for a malformed AI response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Uploaded file exceeds the size limit")]
    PayloadTooLarge,

    #[error("AI service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("AI service returned no usable candidate")]
    UpstreamEmpty,

    #[error("Malformed AI response: {0}")]
    MalformedAiResponse(String),

    #[error("{message}: {source}")]
    Persistence {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Processing error: {0}")]
    Processing(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a store failure with the message the client should see.
    pub fn persistence(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Persistence { message, source }
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::EmptyCandidate | ExtractionError::UnreadableResponse(_) => {
                AppError::UpstreamEmpty
            }
            other => AppError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(e: NormalizeError) -> Self {
        match e {
            NormalizeError::MalformedAiResponse { details } => AppError::MalformedAiResponse(details),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": "Uploaded file is too large" }),
            ),
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("AI service unavailable: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "AI service unavailable" }),
                )
            }
            AppError::UpstreamEmpty => {
                tracing::error!("AI service returned no candidate text");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Invalid response from AI service" }),
                )
            }
            AppError::MalformedAiResponse(details) => {
                tracing::error!("Failed to parse AI response: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to parse AI response", "details": details }),
                )
            }
            AppError::Persistence { message, source } => {
                tracing::error!("{message}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {what}");
                (StatusCode::NOT_FOUND, json!({ "error": "Not found" }))
            }
            AppError::Processing(e) => {
                tracing::error!("Error processing uploaded resume: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to process uploaded resume" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
