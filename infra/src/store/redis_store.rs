//! Redis-backed verification record store
//!
//! One key per identifier under `{prefix}:verify:{identifier}`, holding the
//! record as JSON. The key's TTL matches the record's validity window, so
//! Redis reaps records the verify path never gets to prune.

use async_trait::async_trait;
use tracing::debug;

use tk_core::domain::entities::verification_record::VerificationRecord;
use tk_core::repositories::VerificationStore;
use tk_shared::utils::email::mask_email;

use super::redis_client::RedisClient;

/// Verification record store backed by Redis
#[derive(Clone)]
pub struct RedisVerificationStore {
    /// Redis client for store operations
    client: RedisClient,
    /// Key prefix isolating this application's keys
    key_prefix: String,
}

impl RedisVerificationStore {
    /// Create a new store on top of an established client
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn record_key(&self, identifier: &str) -> String {
        format!("{}:verify:{}", self.key_prefix, identifier)
    }
}

#[async_trait]
impl VerificationStore for RedisVerificationStore {
    async fn get(&self, identifier: &str) -> Result<Option<VerificationRecord>, String> {
        let key = self.record_key(identifier);
        let raw = self.client.get(&key).await.map_err(|e| e.to_string())?;

        match raw {
            Some(json) => {
                let record = serde_json::from_str(&json)
                    .map_err(|e| format!("Corrupt verification record: {}", e))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        let key = self.record_key(&record.identifier);
        let json = serde_json::to_string(record).map_err(|e| e.to_string())?;

        // Key TTL mirrors the record's validity window; at least one second
        // so a record is never written pre-reaped.
        let ttl_seconds = (record.expires_at - record.issued_at).num_seconds().max(1) as u64;

        debug!(
            identifier = %mask_email(&record.identifier),
            ttl_seconds,
            "Storing verification record"
        );

        self.client
            .set_with_expiry(&key, &json, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, identifier: &str) -> Result<(), String> {
        let key = self.record_key(identifier);
        self.client
            .delete(&key)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
