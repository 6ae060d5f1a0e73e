use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::record::CanonicalRecord;

/// A persisted applicant: the stored record plus its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredApplicant {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: CanonicalRecord,
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub record: Value,
}
