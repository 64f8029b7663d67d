//! Email log repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::email_log::EmailLog;
use crate::errors::DomainError;

/// Append-only repository for email delivery log entries
#[async_trait]
pub trait EmailLogRepository: Send + Sync {
    /// Append a log entry
    async fn append(&self, entry: EmailLog) -> Result<(), DomainError>;

    /// List entries recorded for a user, oldest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<EmailLog>, DomainError>;
}
