//! Record Store: assigns ids on save and hands records back by id.
//!
//! Two backends behind one trait: PostgreSQL for real deployments and an in-process map
//! when no `DATABASE_URL` is configured. `AppState` holds an `Arc<dyn ApplicantStore>`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::applicant::StoredApplicant;
use crate::models::record::CanonicalRecord;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryApplicantStore;
pub use postgres::PgApplicantStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record is not a valid applicant: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait ApplicantStore: Send + Sync {
    /// Persists a record exactly once and returns the freshly generated id.
    async fn save(&self, record: &CanonicalRecord) -> Result<Uuid, StoreError>;

    /// `Ok(None)` when no applicant has this id.
    async fn get(&self, id: Uuid) -> Result<Option<StoredApplicant>, StoreError>;
}
