//! Outbound mailer configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for the outbound mail transport
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailerConfig {
    /// Mailer provider ("smtp", "mock")
    pub provider: String,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender address used in the From header
    pub from_address: String,

    /// Display name used in the From header
    pub from_name: String,

    /// Recipient of the daily analytics digest
    pub digest_recipient: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "no-reply@localhost".to_string(),
            from_name: "TalentKit".to_string(),
            digest_recipient: String::new(),
        }
    }
}

impl MailerConfig {
    /// Load mailer configuration from environment variables
    ///
    /// Falls back to the mock provider when no SMTP settings are present,
    /// so development environments work without credentials.
    pub fn from_env() -> Self {
        Self {
            provider: env::var("MAILER_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@localhost".to_string()),
            from_name: env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "TalentKit".to_string()),
            digest_recipient: env::var("DIGEST_RECIPIENT").unwrap_or_default(),
        }
    }

    /// Formatted mailbox for the From header, e.g. `"TalentKit" <no-reply@...>`
    pub fn from_mailbox(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.from_address)
    }
}
