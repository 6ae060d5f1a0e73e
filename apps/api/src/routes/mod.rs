pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applicants::handlers as applicants;
use crate::enrichment::handlers as enrichment;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/enrichresume/upload",
            post(enrichment::handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/applicant/:id", get(applicants::handle_get_applicant))
        .route(
            "/applicant/:id/sections",
            get(applicants::handle_get_applicant_sections),
        )
        .with_state(state)
}
