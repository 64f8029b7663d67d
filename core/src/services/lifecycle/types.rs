//! Types for lifecycle notifications

use chrono::{DateTime, Utc};

/// Account events that trigger an outbound notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Account was created
    Welcome,
    /// Membership upgraded to premium
    PurchaseConfirmation {
        plan: String,
        valid_until: Option<DateTime<Utc>>,
    },
    /// Account password was changed
    PasswordChanged,
    /// Account was permanently deleted
    AccountDeleted,
    /// Premium membership was cancelled
    MembershipCancelled,
    /// Trial membership ends within the notice window
    TrialEnding,
}

impl LifecycleEvent {
    /// Stable kind label used for logging and the email log
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleEvent::Welcome => "welcome",
            LifecycleEvent::PurchaseConfirmation { .. } => "purchase_confirmation",
            LifecycleEvent::PasswordChanged => "password_changed",
            LifecycleEvent::AccountDeleted => "account_deleted",
            LifecycleEvent::MembershipCancelled => "membership_cancelled",
            LifecycleEvent::TrialEnding => "trial_ending",
        }
    }

    /// Whether the user's unsubscribe preference suppresses this event
    ///
    /// The account-deletion farewell always goes out; there is no further
    /// mail to opt out of after it.
    pub fn respects_unsubscribe(&self) -> bool {
        !matches!(self, LifecycleEvent::AccountDeleted)
    }
}

/// Why a notification was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The user opted out of lifecycle emails
    Unsubscribed,
}

/// Outcome of a notification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message
    Sent { message_id: String },
    /// The notification was intentionally not sent
    Skipped { reason: SkipReason },
}

impl DeliveryOutcome {
    /// Whether the message actually went out
    pub fn was_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent { .. })
    }
}
