//! Analytics digest service implementation

use std::sync::Arc;
use tracing;

use tk_shared::utils::validation::validators;

use crate::errors::{DomainError, DomainResult, NotificationError};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;
use crate::services::lifecycle::NotificationMailer;

use super::types::UserStats;

/// Computes user statistics and mails them to an operator address
pub struct DigestService<U, M, C>
where
    U: UserRepository,
    M: NotificationMailer,
    C: Clock,
{
    /// User accounts to aggregate over
    users: Arc<U>,
    /// Outbound mail transport
    mailer: Arc<M>,
    /// Time source anchoring the reporting windows
    clock: Arc<C>,
}

impl<U, M, C> DigestService<U, M, C>
where
    U: UserRepository,
    M: NotificationMailer,
    C: Clock,
{
    /// Create a new digest service
    pub fn new(users: Arc<U>, mailer: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            users,
            mailer,
            clock,
        }
    }

    /// Compute registration statistics as of now
    pub async fn build_stats(&self) -> DomainResult<UserStats> {
        let users = self.users.list_all().await?;
        Ok(UserStats::compute(&users, self.clock.now()))
    }

    /// Compute today's statistics and deliver them to the recipient
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Transport accepted the digest
    /// * `Err(DomainError)` - Empty recipient, repository failure, or
    ///   transport failure
    pub async fn send_daily_digest(&self, recipient: &str) -> DomainResult<String> {
        if !validators::not_empty(recipient) {
            return Err(DomainError::Validation {
                message: "Digest recipient is required".to_string(),
            });
        }
        let recipient = recipient.trim();

        let stats = self.build_stats().await?;
        let message_id = self
            .mailer
            .send_digest(recipient, &stats)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    event = "digest_delivery_failed",
                    "Failed to deliver daily digest"
                );
                DomainError::Notification(NotificationError::Transport { message: e })
            })?;

        tracing::info!(
            total_users = stats.all_time.total,
            premium_users = stats.all_time.premium,
            message_id = %message_id,
            event = "digest_sent",
            "Daily digest delivered"
        );
        Ok(message_id)
    }
}
