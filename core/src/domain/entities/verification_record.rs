//! Verification record entity for email-based verification codes.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code value; codes never start with a zero
pub const CODE_MIN: u32 = 100_000;

/// Largest code value
pub const CODE_MAX: u32 = 999_999;

/// Validity window for an issued code (5 minutes)
pub const CODE_TTL_MINUTES: i64 = 5;

/// A one-time verification code bound to an identifier (an email address).
///
/// At most one record exists per identifier; issuing again overwrites the
/// previous record. The record is deleted when a verification attempt
/// succeeds or discovers it expired, and kept on a wrong-code attempt so the
/// caller can retry within the TTL window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// The identifier this code was issued for; acts as the record key
    pub identifier: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp assigned at the moment of the store write
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer valid
    pub expires_at: DateTime<Utc>,

    /// Issuance-flow flags, opaque to verification logic
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl VerificationRecord {
    /// Create a record for an identifier with the given code and TTL
    ///
    /// # Arguments
    ///
    /// * `identifier` - The subject the code is bound to
    /// * `code` - The generated 6-digit code
    /// * `issued_at` - Write-time timestamp from the issuer's trusted clock
    /// * `ttl` - Validity window; `expires_at` is exactly `issued_at + ttl`
    /// * `metadata` - Flow flags passed through to the notifier unchanged
    pub fn new(
        identifier: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        metadata: HashMap<String, Value>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at + ttl,
            metadata,
        }
    }

    /// Check whether the record has expired at the given instant
    ///
    /// Expiry is strict: a record is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compare a submitted code against the stored code
    ///
    /// Exact string equality with no normalization, evaluated in constant
    /// time to avoid leaking match position through timing.
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_record_expiry_window() {
        let now = fixed_now();
        let record = VerificationRecord::new(
            "user@example.com",
            "123456",
            now,
            Duration::minutes(CODE_TTL_MINUTES),
            HashMap::new(),
        );

        assert_eq!(record.identifier, "user@example.com");
        assert_eq!(record.issued_at, now);
        assert_eq!(record.expires_at, now + Duration::minutes(5));
    }

    #[test]
    fn test_is_expired_at_is_strict() {
        let now = fixed_now();
        let record = VerificationRecord::new(
            "user@example.com",
            "123456",
            now,
            Duration::minutes(5),
            HashMap::new(),
        );

        assert!(!record.is_expired_at(now));
        assert!(!record.is_expired_at(record.expires_at));
        assert!(record.is_expired_at(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_matches_exact_equality() {
        let record = VerificationRecord::new(
            "user@example.com",
            "123456",
            fixed_now(),
            Duration::minutes(5),
            HashMap::new(),
        );

        assert!(record.matches("123456"));
        assert!(!record.matches("123457"));
        assert!(!record.matches("12345"));
        assert!(!record.matches("1234567"));
        assert!(!record.matches(" 123456"));
    }

    #[test]
    fn test_metadata_round_trip() {
        let mut metadata = HashMap::new();
        metadata.insert("google_sign_in".to_string(), Value::Bool(true));

        let record = VerificationRecord::new(
            "user@example.com",
            "654321",
            fixed_now(),
            Duration::minutes(5),
            metadata,
        );

        let json = serde_json::to_string(&record).unwrap();
        let restored: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
        assert_eq!(restored.metadata["google_sign_in"], Value::Bool(true));
    }

    #[test]
    fn test_empty_metadata_not_serialized() {
        let record = VerificationRecord::new(
            "user@example.com",
            "654321",
            fixed_now(),
            Duration::minutes(5),
            HashMap::new(),
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("metadata"));
    }
}
