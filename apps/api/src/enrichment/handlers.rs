use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::enrichment::pdf::extract_pdf_text;
use crate::enrichment::pipeline::enrich_resume;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the resume document.
const PDF_FIELD: &str = "pdf";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub id: Uuid,
}

/// POST /enrichresume/upload
///
/// Extracts the PDF's text, asks the AI service to structure it, and saves the result.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let multipart = multipart.map_err(|e| {
        warn!("Rejected upload body: {e}");
        AppError::Input("No file uploaded".to_string())
    })?;

    let pdf = read_pdf_field(multipart)
        .await?
        .ok_or_else(|| AppError::Input("No file uploaded".to_string()))?;
    info!("Received {} byte resume upload", pdf.len());

    let raw_text = extract_pdf_text(pdf).await?;
    let id = enrich_resume(&raw_text, state.extractor.as_ref(), state.store.as_ref()).await?;

    Ok(Json(UploadResponse {
        message: "Resume saved successfully",
        id,
    }))
}

/// Returns the first non-empty `pdf` field, skipping any other parts.
async fn read_pdf_field(mut multipart: Multipart) -> Result<Option<Bytes>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }
        let data = field.bytes().await.map_err(multipart_error)?;
        if !data.is_empty() {
            return Ok(Some(data));
        }
    }
    Ok(None)
}

/// A body over the upload limit surfaces here as a read error; anything else means the
/// client did not send a usable multipart body.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeds the body limit: {e}");
        return AppError::PayloadTooLarge;
    }
    warn!("Malformed multipart body: {e}");
    AppError::Input("No file uploaded".to_string())
}
