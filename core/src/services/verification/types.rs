//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
///
/// The code itself is deliberately absent: it only ever leaves the service
/// through the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueResult {
    /// When the record was written
    pub issued_at: DateTime<Utc>,

    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,

    /// Transport message id returned by the notifier
    pub message_id: String,
}
