//! Mock Mailer Implementation
//!
//! A mock implementation of the mail transport for development and testing.
//! Messages are printed to the console instead of being sent.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use tk_core::services::digest::UserStats;
use tk_core::services::lifecycle::{LifecycleEvent, NotificationMailer};
use tk_core::services::verification::CodeNotifier;
use tk_shared::utils::email::{is_valid_email, mask_email};

/// Mock mailer for development and testing
///
/// This implementation:
/// - Prints messages to the console
/// - Generates mock message ids
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    fn deliver(&self, recipient: &str, subject: &str) -> Result<String, String> {
        if !is_valid_email(recipient) {
            return Err(format!(
                "Invalid recipient address: {}",
                mask_email(recipient)
            ));
        }

        if self.simulate_failure {
            warn!(
                "Mock mailer simulating failure for recipient: {}",
                mask_email(recipient)
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mailer",
            provider = "mock",
            recipient = %mask_email(recipient),
            message_id = %message_id,
            subject = subject,
            "Mail sent successfully (mock)"
        );

        Ok(message_id)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeNotifier for MockMailer {
    async fn send_code(
        &self,
        identifier: &str,
        code: &str,
        metadata: &HashMap<String, Value>,
    ) -> Result<String, String> {
        let subject = if metadata.get("google_sign_in") == Some(&Value::Bool(true)) {
            "Complete Your Google Sign-in"
        } else {
            "Your Verification Code"
        };

        let message_id = self.deliver(identifier, subject)?;
        if self.console_output {
            println!("Verification code for {}: {}", identifier, code);
        }
        Ok(message_id)
    }
}

#[async_trait]
impl NotificationMailer for MockMailer {
    async fn send_lifecycle(
        &self,
        recipient: &str,
        display_name: &str,
        event: &LifecycleEvent,
    ) -> Result<String, String> {
        let subject = format!("[{}] notification for {}", event.kind(), display_name);
        self.deliver(recipient, &subject)
    }

    async fn send_digest(&self, recipient: &str, stats: &UserStats) -> Result<String, String> {
        let subject = format!(
            "Daily digest: {} users ({} premium)",
            stats.all_time.total, stats.all_time.premium
        );
        self.deliver(recipient, &subject)
    }
}
