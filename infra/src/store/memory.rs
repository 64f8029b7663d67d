//! In-memory verification record store
//!
//! Backs development environments and tests; nothing expires on its own, so
//! the verify path's pruning is the only reaper.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tk_core::domain::entities::verification_record::VerificationRecord;
use tk_core::repositories::VerificationStore;

/// Verification record store backed by a `HashMap`
#[derive(Clone, Default)]
pub struct InMemoryVerificationStore {
    records: Arc<RwLock<HashMap<String, VerificationRecord>>>,
}

impl InMemoryVerificationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationStore for InMemoryVerificationStore {
    async fn get(&self, identifier: &str) -> Result<Option<VerificationRecord>, String> {
        Ok(self.records.read().await.get(identifier).cloned())
    }

    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        self.records
            .write()
            .await
            .insert(record.identifier.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<(), String> {
        self.records.write().await.remove(identifier);
        Ok(())
    }
}
