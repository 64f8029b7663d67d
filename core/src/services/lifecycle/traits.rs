//! Mailer trait for lifecycle and digest notifications

use async_trait::async_trait;

use crate::services::digest::UserStats;

use super::types::LifecycleEvent;

/// Outbound transport for account notifications
///
/// Template selection and rendering live behind this trait; the services
/// hand over the event (or stats) and the recipient, nothing more.
#[async_trait]
pub trait NotificationMailer: Send + Sync {
    /// Deliver a lifecycle notification, returning the transport message id
    async fn send_lifecycle(
        &self,
        recipient: &str,
        display_name: &str,
        event: &LifecycleEvent,
    ) -> Result<String, String>;

    /// Deliver the analytics digest, returning the transport message id
    async fn send_digest(&self, recipient: &str, stats: &UserStats) -> Result<String, String>;
}
