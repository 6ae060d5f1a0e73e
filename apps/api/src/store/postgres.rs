use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::applicant::{ApplicantRow, StoredApplicant};
use crate::models::record::CanonicalRecord;
use crate::store::{ApplicantStore, StoreError};

/// Applicants persisted as JSONB in the `applicants` table.
/// Rows are INSERTed once and never UPDATEd.
#[derive(Clone)]
pub struct PgApplicantStore {
    pool: PgPool,
}

impl PgApplicantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicantStore for PgApplicantStore {
    async fn save(&self, record: &CanonicalRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let data = serde_json::to_value(record)?;

        sqlx::query("INSERT INTO applicants (id, record) VALUES ($1, $2)")
            .bind(id)
            .bind(&data)
            .execute(&self.pool)
            .await?;

        info!("Inserted applicant {id}");
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredApplicant>, StoreError> {
        let row: Option<ApplicantRow> =
            sqlx::query_as("SELECT id, record FROM applicants WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(StoredApplicant {
            id: row.id,
            record: serde_json::from_value(row.record)?,
        }))
    }
}
