//! Verification store trait defining the key-value boundary for
//! verification records.
//!
//! The service must not hard-code a specific store client; any backend that
//! offers atomic per-key get/set/delete can implement this trait. Errors are
//! surfaced as plain strings and mapped to `StoreUnavailable` by the service,
//! so implementations stay free of domain error types.

use async_trait::async_trait;

use crate::domain::entities::verification_record::VerificationRecord;

/// Key-value storage for verification records, keyed by identifier
///
/// Implementations must provide overwrite semantics on `put`: issuing a new
/// code for an identifier replaces any record already stored under that key.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Fetch the record for an identifier
    ///
    /// # Returns
    /// * `Ok(Some(record))` - An active record exists
    /// * `Ok(None)` - No record stored (never issued, consumed, or reaped)
    /// * `Err(message)` - The store could not be reached
    async fn get(&self, identifier: &str) -> Result<Option<VerificationRecord>, String>;

    /// Write or overwrite the record for its identifier
    async fn put(&self, record: &VerificationRecord) -> Result<(), String>;

    /// Delete the record for an identifier
    ///
    /// Deleting an absent record is not an error.
    async fn delete(&self, identifier: &str) -> Result<(), String>;
}
