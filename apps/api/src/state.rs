use std::sync::Arc;

use crate::llm_client::ResumeExtractor;
use crate::store::ApplicantStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators are built once in `main` and passed in here; nothing is global.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production. Swappable for any `ResumeExtractor`.
    pub extractor: Arc<dyn ResumeExtractor>,
    /// PostgreSQL when `DATABASE_URL` is set, otherwise in-memory.
    pub store: Arc<dyn ApplicantStore>,
}
