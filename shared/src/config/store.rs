//! Document store configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the key-value document store backing verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Store connection URL
    pub url: String,

    /// Connection pool size
    pub pool_size: u32,

    /// Key prefix applied to all keys written by this application
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            key_prefix: "talentkit".to_string(),
        }
    }
}

impl StoreConfig {
    /// Load store configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            url: env::var("STORE_URL")
                .or_else(|_| env::var("REDIS_URL"))
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            pool_size: env::var("STORE_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            key_prefix: env::var("STORE_KEY_PREFIX").unwrap_or_else(|_| "talentkit".to_string()),
        }
    }
}
