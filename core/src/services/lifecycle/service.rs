//! Lifecycle notification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing;
use uuid::Uuid;

use tk_shared::utils::email::mask_email;

use crate::domain::entities::email_log::EmailLog;
use crate::domain::entities::user::{MembershipStatus, User};
use crate::errors::{DomainError, DomainResult, NotificationError};
use crate::repositories::{EmailLogRepository, UserRepository};
use crate::services::clock::Clock;

use super::traits::NotificationMailer;
use super::types::{DeliveryOutcome, LifecycleEvent, SkipReason};

/// Sends lifecycle notifications and keeps the email log current
pub struct LifecycleMailer<U, M, L, C>
where
    U: UserRepository,
    M: NotificationMailer,
    L: EmailLogRepository,
    C: Clock,
{
    /// User accounts, consulted for address and unsubscribe state
    users: Arc<U>,
    /// Outbound mail transport
    mailer: Arc<M>,
    /// Delivery log
    email_log: Arc<L>,
    /// Time source for log timestamps
    clock: Arc<C>,
}

impl<U, M, L, C> LifecycleMailer<U, M, L, C>
where
    U: UserRepository,
    M: NotificationMailer,
    L: EmailLogRepository,
    C: Clock,
{
    /// Create a new lifecycle mailer
    pub fn new(users: Arc<U>, mailer: Arc<M>, email_log: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            users,
            mailer,
            email_log,
            clock,
        }
    }

    /// Send a lifecycle notification to a user by id
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryOutcome::Sent)` - Transport accepted the message
    /// * `Ok(DeliveryOutcome::Skipped)` - Suppressed by the user's opt-out
    /// * `Err(DomainError)` - User unknown, transport failed, or log write
    ///   failed; transport failures are still recorded in the email log
    pub async fn notify(&self, user_id: Uuid, event: LifecycleEvent) -> DomainResult<DeliveryOutcome> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;
        self.notify_user(&user, event).await
    }

    /// Send a lifecycle notification to an already-loaded user
    pub async fn notify_user(
        &self,
        user: &User,
        event: LifecycleEvent,
    ) -> DomainResult<DeliveryOutcome> {
        if user.unsubscribed && event.respects_unsubscribe() {
            tracing::info!(
                user_id = %user.id,
                kind = event.kind(),
                event = "notification_skipped",
                "User has unsubscribed from lifecycle emails"
            );
            return Ok(DeliveryOutcome::Skipped {
                reason: SkipReason::Unsubscribed,
            });
        }

        let display_name = user.display_name_or_default();
        match self
            .mailer
            .send_lifecycle(&user.email, display_name, &event)
            .await
        {
            Ok(message_id) => {
                self.email_log
                    .append(EmailLog::delivered(
                        &user.email,
                        event.kind(),
                        Some(user.id),
                        &message_id,
                        self.clock.now(),
                    ))
                    .await?;
                tracing::info!(
                    user_id = %user.id,
                    recipient = %mask_email(&user.email),
                    kind = event.kind(),
                    message_id = %message_id,
                    event = "notification_sent",
                    "Lifecycle notification delivered"
                );
                Ok(DeliveryOutcome::Sent { message_id })
            }
            Err(e) => {
                self.email_log
                    .append(EmailLog::failed(
                        &user.email,
                        event.kind(),
                        Some(user.id),
                        &e,
                        self.clock.now(),
                    ))
                    .await?;
                tracing::error!(
                    user_id = %user.id,
                    recipient = %mask_email(&user.email),
                    kind = event.kind(),
                    error = %e,
                    event = "notification_failed",
                    "Lifecycle notification delivery failed"
                );
                Err(NotificationError::Transport { message: e }.into())
            }
        }
    }

    /// React to a membership status transition
    ///
    /// A transition into premium sends a purchase confirmation; leaving
    /// premium for the free tier sends a cancellation notice. Every other
    /// transition is silent.
    pub async fn handle_membership_change(
        &self,
        user_id: Uuid,
        old_status: MembershipStatus,
        new_status: MembershipStatus,
    ) -> DomainResult<Option<DeliveryOutcome>> {
        if old_status == new_status {
            return Ok(None);
        }

        let event = if new_status == MembershipStatus::Premium {
            let user = self
                .users
                .find_by_id(user_id)
                .await?
                .ok_or(DomainError::NotFound {
                    resource: format!("user {}", user_id),
                })?;
            Some(LifecycleEvent::PurchaseConfirmation {
                plan: user.membership_plan.clone().unwrap_or_default(),
                valid_until: user.membership_end_date,
            })
        } else if old_status == MembershipStatus::Premium
            && new_status == MembershipStatus::Free
        {
            Some(LifecycleEvent::MembershipCancelled)
        } else {
            None
        };

        match event {
            Some(event) => Ok(Some(self.notify(user_id, event).await?)),
            None => Ok(None),
        }
    }

    /// Notify all starter-tier users whose trial ends by the cutoff
    ///
    /// Delivery failures for individual users are logged and do not abort
    /// the sweep. Returns the number of notifications actually delivered.
    pub async fn notify_trials_ending(&self, cutoff: DateTime<Utc>) -> DomainResult<usize> {
        let users = self.users.find_trials_ending_by(cutoff).await?;
        let total = users.len();
        let mut delivered = 0;

        for user in &users {
            match self.notify_user(user, LifecycleEvent::TrialEnding).await {
                Ok(outcome) if outcome.was_sent() => delivered += 1,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        user_id = %user.id,
                        error = %e,
                        event = "trial_ending_delivery_failed",
                        "Continuing trial-ending sweep after delivery failure"
                    );
                }
            }
        }

        tracing::info!(
            delivered,
            total,
            event = "trial_ending_sweep",
            "Trial-ending notification sweep finished"
        );
        Ok(delivered)
    }

    /// Record a user's opt-out from lifecycle emails
    ///
    /// Idempotent: unsubscribing an already-unsubscribed user keeps the
    /// original opt-out timestamp.
    pub async fn unsubscribe(&self, user_id: Uuid) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;

        if !user.unsubscribed {
            user.mark_unsubscribed(self.clock.now());
            self.users.update(user).await?;
            tracing::info!(
                user_id = %user_id,
                event = "user_unsubscribed",
                "User opted out of lifecycle emails"
            );
        }
        Ok(())
    }
}
