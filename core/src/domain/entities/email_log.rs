//! Email delivery log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record of one outbound email delivery attempt
///
/// Both successes and failures are logged so support can reconstruct what a
/// user was (or was not) sent. The log never contains message bodies or
/// verification codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLog {
    /// Unique identifier for the log entry
    pub id: Uuid,

    /// Recipient address
    pub recipient: String,

    /// Notification kind (e.g. "welcome", "trial_ending")
    pub kind: String,

    /// The user the notification concerned, when known
    pub user_id: Option<Uuid>,

    /// When the delivery attempt was made
    pub sent_at: DateTime<Utc>,

    /// Whether the transport accepted the message
    pub success: bool,

    /// Transport message id, on success
    pub message_id: Option<String>,

    /// Transport error description, on failure
    pub error: Option<String>,
}

impl EmailLog {
    /// Log entry for a delivered message
    pub fn delivered(
        recipient: impl Into<String>,
        kind: impl Into<String>,
        user_id: Option<Uuid>,
        message_id: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            kind: kind.into(),
            user_id,
            sent_at,
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    /// Log entry for a failed delivery attempt
    pub fn failed(
        recipient: impl Into<String>,
        kind: impl Into<String>,
        user_id: Option<Uuid>,
        error: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            kind: kind.into(),
            user_id,
            sent_at,
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}
