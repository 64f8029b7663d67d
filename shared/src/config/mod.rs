//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `mailer` - Outbound mail transport configuration
//! - `store` - Document/key-value store configuration

pub mod environment;
pub mod mailer;
pub mod store;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::{Environment, LoggingConfig};
pub use mailer::MailerConfig;
pub use store::StoreConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Outbound mailer configuration
    pub mailer: MailerConfig,

    /// Document store configuration
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            mailer: MailerConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            mailer: MailerConfig::from_env(),
            store: StoreConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}
