//! In-memory implementation of DocumentStore for development and testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::DomainError;

use super::trait_::DocumentStore;

type DocumentKey = (Uuid, String, String);

/// In-memory document store backed by a `HashMap`
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentKey, Value>>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a document, if present
    pub async fn get(&self, owner: Uuid, collection: &str, document_id: &str) -> Option<Value> {
        let documents = self.documents.read().await;
        documents
            .get(&(owner, collection.to_string(), document_id.to_string()))
            .cloned()
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn set(
        &self,
        owner: Uuid,
        collection: &str,
        document_id: &str,
        value: Value,
        merge: bool,
    ) -> Result<(), DomainError> {
        let key = (owner, collection.to_string(), document_id.to_string());
        let mut documents = self.documents.write().await;

        let stored = if merge {
            match (documents.get(&key), &value) {
                (Some(Value::Object(existing)), Value::Object(incoming)) => {
                    let mut merged = existing.clone();
                    for (k, v) in incoming {
                        merged.insert(k.clone(), v.clone());
                    }
                    Value::Object(merged)
                }
                _ => value,
            }
        } else {
            value
        };

        documents.insert(key, stored);
        Ok(())
    }

    async fn delete(
        &self,
        owner: Uuid,
        collection: &str,
        document_id: &str,
    ) -> Result<(), DomainError> {
        let key = (owner, collection.to_string(), document_id.to_string());
        self.documents.write().await.remove(&key);
        Ok(())
    }
}
