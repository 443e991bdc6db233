//! In-memory code store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mg_core::domain::{Consumption, VerificationRecord};
use mg_core::errors::StoreError;
use mg_core::repositories::CodeStore;

/// Code store over a mutex-guarded map
#[derive(Default)]
pub struct InMemoryCodeStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl CodeStore for InMemoryCodeStore {
    async fn upsert(&self, record: &VerificationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .insert(record.identity.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, identity: &str) -> Result<Option<VerificationRecord>, StoreError> {
        Ok(self.records.lock().await.get(identity).cloned())
    }

    async fn delete(&self, identity: &str) -> Result<bool, StoreError> {
        Ok(self.records.lock().await.remove(identity).is_some())
    }

    async fn consume(
        &self,
        record: &VerificationRecord,
        _consumption: Consumption,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.lock().await;
        if records.get(&record.identity) == Some(record) {
            records.remove(&record.identity);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
