use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::applicant::StoredApplicant;
use crate::sections::{classify, SectionDescriptor};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApplicantSectionsResponse {
    pub id: Uuid,
    pub sections: Vec<SectionDescriptor>,
}

/// GET /applicant/:id
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredApplicant>, AppError> {
    Ok(Json(load_applicant(&state, &id).await?))
}

/// GET /applicant/:id/sections
///
/// The stored record classified into ordered render directives.
pub async fn handle_get_applicant_sections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplicantSectionsResponse>, AppError> {
    let applicant = load_applicant(&state, &id).await?;
    Ok(Json(ApplicantSectionsResponse {
        id: applicant.id,
        sections: classify(&applicant.record),
    }))
}

/// An id that is not a UUID cannot name a stored applicant, so it is a 404 too.
async fn load_applicant(state: &AppState, id: &str) -> Result<StoredApplicant, AppError> {
    let not_found = || AppError::NotFound(format!("Applicant {id} not found"));
    let id = Uuid::parse_str(id).map_err(|_| not_found())?;

    state
        .store
        .get(id)
        .await
        .map_err(AppError::persistence("Failed to fetch applicant"))?
        .ok_or_else(not_found)
}
