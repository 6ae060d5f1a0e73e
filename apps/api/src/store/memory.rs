use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::applicant::StoredApplicant;
use crate::models::record::CanonicalRecord;
use crate::store::{ApplicantStore, StoreError};

/// Process-local store. Records live as long as the process does.
#[derive(Default)]
pub struct InMemoryApplicantStore {
    records: RwLock<HashMap<Uuid, CanonicalRecord>>,
}

impl InMemoryApplicantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicantStore for InMemoryApplicantStore {
    async fn save(&self, record: &CanonicalRecord) -> Result<Uuid, StoreError> {
        let mut records = self.records.write().await;
        let mut id = Uuid::new_v4();
        while records.contains_key(&id) {
            id = Uuid::new_v4();
        }
        records.insert(id, record.clone());
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<StoredApplicant>, StoreError> {
        let records = self.records.read().await;
        Ok(records.get(&id).map(|record| StoredApplicant {
            id,
            record: record.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CanonicalRecord {
        serde_json::from_value(json!({
            "name": "Jane Doe",
            "email": "j@x.com",
            "education": {"degree": "BSc", "year": "2020"},
            "experience": [{"job_title": "Engineer", "company": "Acme"}],
            "skills": ["Go", "Rust"],
            "summary": "Builds things"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_get_round_trips() {
        let store = InMemoryApplicantStore::new();
        let record = sample();
        let id = store.save(&record).await.unwrap();
        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.record, record);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = InMemoryApplicantStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_each_save_gets_a_fresh_id() {
        let store = InMemoryApplicantStore::new();
        let a = store.save(&sample()).await.unwrap();
        let b = store.save(&sample()).await.unwrap();
        assert_ne!(a, b);
        assert!(store.get(a).await.unwrap().is_some());
        assert!(store.get(b).await.unwrap().is_some());
    }
}
