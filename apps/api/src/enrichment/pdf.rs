use anyhow::{anyhow, Context};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF.
///
/// `pdf-extract` is synchronous and CPU-bound, so it runs on the blocking pool.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let size = pdf.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .context("PDF extraction task panicked")?
        .map_err(|e| anyhow!("Failed to extract text from PDF: {e}"))?;

    debug!("Extracted {} chars from {} byte PDF", text.len(), size);
    Ok(text)
}
