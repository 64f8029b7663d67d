//! In-memory implementation of EmailLogRepository for development and testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::email_log::EmailLog;
use crate::errors::DomainError;

use super::trait_::EmailLogRepository;

/// In-memory email log backed by a `Vec`
#[derive(Clone, Default)]
pub struct InMemoryEmailLogRepository {
    entries: Arc<RwLock<Vec<EmailLog>>>,
}

impl InMemoryEmailLogRepository {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries recorded so far, oldest first
    pub async fn entries(&self) -> Vec<EmailLog> {
        self.entries.read().await.clone()
    }

    /// Number of recorded entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no entries have been recorded
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EmailLogRepository for InMemoryEmailLogRepository {
    async fn append(&self, entry: EmailLog) -> Result<(), DomainError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<EmailLog>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}
