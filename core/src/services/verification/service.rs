//! Main verification service implementation

use chrono::Duration;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing;

use tk_shared::utils::email::mask_email;
use tk_shared::utils::validation::validators;

use crate::domain::entities::verification_record::{
    VerificationRecord, CODE_LENGTH, CODE_MAX, CODE_MIN,
};
use crate::errors::VerificationError;
use crate::repositories::VerificationStore;
use crate::services::clock::Clock;

use super::config::VerificationServiceConfig;
use super::traits::CodeNotifier;
use super::types::IssueResult;

/// Verification service for issuing and validating one-time email codes
///
/// State lives entirely in the injected store; each call runs to completion
/// independently, so the service itself is freely shareable across tasks.
pub struct VerificationService<S, N, C>
where
    S: VerificationStore,
    N: CodeNotifier,
    C: Clock,
{
    /// Key-value store holding one record per identifier
    store: Arc<S>,
    /// Outbound channel delivering codes
    notifier: Arc<N>,
    /// Trusted clock for issuance and expiry decisions
    clock: Arc<C>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S, N, C> VerificationService<S, N, C>
where
    S: VerificationStore,
    N: CodeNotifier,
    C: Clock,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Verification record store implementation
    /// * `notifier` - Code delivery channel implementation
    /// * `clock` - Time source; inject a manual clock in tests
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        clock: Arc<C>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            config,
        }
    }

    /// Issue a verification code for an identifier
    ///
    /// Overwrites any code previously issued for the identifier, so the most
    /// recent code is the only valid one. The record is written before the
    /// notifier is invoked: a verify call can never observe a delivered code
    /// without its record. The generated code never appears in the return
    /// value; it travels only through the notifier.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The subject to bind the code to (an email address)
    /// * `metadata` - Optional issuance-flow flags, passed through to the
    ///   notifier and stored with the record unchanged
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - Issuance timestamps and the transport message id
    /// * `Err(VerificationError)` - `InvalidInput`, `StoreUnavailable`, or
    ///   `NotifierUnavailable`
    pub async fn issue(
        &self,
        identifier: &str,
        metadata: Option<HashMap<String, Value>>,
    ) -> Result<IssueResult, VerificationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(VerificationError::InvalidInput {
                field: "identifier".to_string(),
            });
        }

        let code = Self::generate_code();
        // The store cannot assign write timestamps, so the trusted local
        // clock at the moment of the write call is authoritative.
        let issued_at = self.clock.now();
        let record = VerificationRecord::new(
            identifier,
            code,
            issued_at,
            Duration::minutes(self.config.code_ttl_minutes),
            metadata.unwrap_or_default(),
        );

        self.store.put(&record).await.map_err(|e| {
            tracing::error!(
                identifier = %mask_email(identifier),
                error = %e,
                event = "code_store_failed",
                "Failed to store verification record"
            );
            VerificationError::StoreUnavailable { message: e }
        })?;

        tracing::info!(
            identifier = %mask_email(identifier),
            event = "code_issued",
            expires_at = %record.expires_at,
            "Issued verification code"
        );

        // Delivery failure leaves the record in place; it is unusable without
        // the code and expires on its own.
        let message_id = self
            .notifier
            .send_code(identifier, &record.code, &record.metadata)
            .await
            .map_err(|e| {
                tracing::error!(
                    identifier = %mask_email(identifier),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                VerificationError::NotifierUnavailable { message: e }
            })?;

        Ok(IssueResult {
            issued_at: record.issued_at,
            expires_at: record.expires_at,
            message_id,
        })
    }

    /// Verify a submitted code for an identifier
    ///
    /// Consumes the record on success and on detected expiry; a wrong code
    /// leaves the record intact so the caller may retry until it expires.
    ///
    /// # Arguments
    ///
    /// * `identifier` - The subject the code was issued for
    /// * `submitted_code` - The code to check, compared by exact string
    ///   equality with no normalization
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code matched; the record has been consumed
    /// * `Err(VerificationError)` - `InvalidInput`, `NotFound`, `Expired`,
    ///   `Mismatch`, or `StoreUnavailable`
    pub async fn verify(
        &self,
        identifier: &str,
        submitted_code: &str,
    ) -> Result<(), VerificationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(VerificationError::InvalidInput {
                field: "identifier".to_string(),
            });
        }
        if !validators::length_between(submitted_code, CODE_LENGTH, CODE_LENGTH)
            || !validators::is_numeric(submitted_code)
        {
            return Err(VerificationError::InvalidInput {
                field: "code".to_string(),
            });
        }

        let record = self
            .store
            .get(identifier)
            .await
            .map_err(|e| VerificationError::StoreUnavailable { message: e })?
            .ok_or(VerificationError::NotFound)?;

        if record.is_expired_at(self.clock.now()) {
            self.store
                .delete(identifier)
                .await
                .map_err(|e| VerificationError::StoreUnavailable { message: e })?;
            tracing::info!(
                identifier = %mask_email(identifier),
                event = "code_expired",
                "Pruned expired verification record"
            );
            return Err(VerificationError::Expired);
        }

        if !record.matches(submitted_code) {
            tracing::warn!(
                identifier = %mask_email(identifier),
                event = "code_mismatch",
                "Verification attempt with wrong code"
            );
            return Err(VerificationError::Mismatch);
        }

        self.store
            .delete(identifier)
            .await
            .map_err(|e| VerificationError::StoreUnavailable { message: e })?;

        tracing::info!(
            identifier = %mask_email(identifier),
            event = "code_verified",
            "Verification code accepted"
        );

        Ok(())
    }

    /// Generate a uniformly random 6-digit verification code
    ///
    /// Codes are drawn from [100000, 999999], so they never start with a
    /// zero.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }
}
