//! Upload pipeline: raw text → AI extraction → normalize → persist.
//!
//! Strictly sequential per request. Nothing is saved unless normalization succeeds,
//! and no AI call is made for blank input.

use tracing::{debug, info};
use uuid::Uuid;

use crate::enrichment::normalizer::normalize;
use crate::errors::AppError;
use crate::llm_client::ResumeExtractor;
use crate::models::record::Slot;
use crate::store::ApplicantStore;

pub async fn enrich_resume(
    raw_text: &str,
    extractor: &dyn ResumeExtractor,
    store: &dyn ApplicantStore,
) -> Result<Uuid, AppError> {
    if raw_text.trim().is_empty() {
        return Err(AppError::Input("No readable text in the PDF".to_string()));
    }

    info!("Requesting extraction for {} chars of resume text", raw_text.len());
    let response_text = extractor.extract(raw_text).await?;

    let record = normalize(&response_text)?;
    debug!(
        "Normalized AI response: {} experience entries, {} extra fields",
        record
            .experience
            .as_ref()
            .and_then(Slot::typed)
            .map_or(0, |e| e.entries().len()),
        record.extra.len()
    );

    let id = store
        .save(&record.persisted())
        .await
        .map_err(AppError::persistence("Failed to process uploaded resume"))?;

    info!("Resume saved as applicant {id}");
    Ok(id)
}
