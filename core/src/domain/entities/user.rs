//! User entity and membership status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used when a user has not set one
pub const DEFAULT_DISPLAY_NAME: &str = "Valued User";

/// Membership tier of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Free tier
    Free,
    /// Trial tier, converts or lapses at the membership end date
    Starter,
    /// Paid tier
    Premium,
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipStatus::Free => write!(f, "free"),
            MembershipStatus::Starter => write!(f, "starter"),
            MembershipStatus::Premium => write!(f, "premium"),
        }
    }
}

/// A user account as seen by the messaging layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Primary email address
    pub email: String,

    /// Profile display name, if the user set one
    pub display_name: Option<String>,

    /// Current membership tier
    pub membership_status: MembershipStatus,

    /// Name of the purchased plan, for premium members
    pub membership_plan: Option<String>,

    /// When the current membership or trial ends
    pub membership_end_date: Option<DateTime<Utc>>,

    /// When the account was registered; absent for legacy imports
    pub registered_at: Option<DateTime<Utc>>,

    /// Whether the user opted out of lifecycle emails
    pub unsubscribed: bool,

    /// When the user opted out
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new free-tier user registered at the given instant
    pub fn new(email: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            display_name: None,
            membership_status: MembershipStatus::Free,
            membership_plan: None,
            membership_end_date: None,
            registered_at: Some(registered_at),
            unsubscribed: false,
            unsubscribed_at: None,
        }
    }

    /// Display name, falling back to the product default
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Whether the user is on the paid tier
    pub fn is_premium(&self) -> bool {
        self.membership_status == MembershipStatus::Premium
    }

    /// Record an opt-out from lifecycle emails
    pub fn mark_unsubscribed(&mut self, at: DateTime<Utc>) {
        self.unsubscribed = true;
        self.unsubscribed_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("user@example.com", Utc::now());
        assert_eq!(user.membership_status, MembershipStatus::Free);
        assert!(!user.unsubscribed);
        assert!(user.membership_plan.is_none());
        assert_eq!(user.display_name_or_default(), DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn test_display_name_preferred_when_set() {
        let mut user = User::new("user@example.com", Utc::now());
        user.display_name = Some("Ada".to_string());
        assert_eq!(user.display_name_or_default(), "Ada");
    }

    #[test]
    fn test_mark_unsubscribed() {
        let mut user = User::new("user@example.com", Utc::now());
        let at = Utc::now();
        user.mark_unsubscribed(at);
        assert!(user.unsubscribed);
        assert_eq!(user.unsubscribed_at, Some(at));
    }

    #[test]
    fn test_membership_status_serde() {
        let json = serde_json::to_string(&MembershipStatus::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
        let status: MembershipStatus = serde_json::from_str("\"starter\"").unwrap();
        assert_eq!(status, MembershipStatus::Starter);
    }
}
