//! SMTP mailer built on lettre
//!
//! Production mail transport. Construction validates configuration and the
//! relay handshake setup; delivery failures surface as strings on the trait
//! boundary and become `NotifierUnavailable` / transport errors upstream.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use tk_core::services::digest::UserStats;
use tk_core::services::lifecycle::{LifecycleEvent, NotificationMailer};
use tk_core::services::verification::CodeNotifier;
use tk_shared::config::MailerConfig;
use tk_shared::utils::email::{is_valid_email, mask_email};

use crate::InfrastructureError;

/// SMTP mail transport
#[derive(Clone)]
pub struct SmtpMailer {
    /// Async SMTP transport over STARTTLS
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Mailer configuration (sender identity, relay settings)
    config: MailerConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration
    ///
    /// Fails when the relay host is missing or the sender mailbox cannot be
    /// parsed, so a broken configuration is caught at startup rather than on
    /// the first delivery.
    pub fn new(config: MailerConfig) -> Result<Self, InfrastructureError> {
        if config.smtp_host.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "SMTP host is required".to_string(),
            ));
        }
        // Catch a malformed sender identity up front
        config
            .from_mailbox()
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender mailbox: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Mailer(e.to_string()))?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP mailer configured"
        );

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Check connectivity to the relay
    pub async fn verify_connection(&self) -> bool {
        self.transport.test_connection().await.unwrap_or(false)
    }

    async fn send(&self, recipient: &str, subject: &str, body: String) -> Result<String, String> {
        if !is_valid_email(recipient) {
            return Err(format!(
                "Invalid recipient address: {}",
                mask_email(recipient)
            ));
        }

        let from: Mailbox = self
            .config
            .from_mailbox()
            .parse()
            .map_err(|e| format!("Invalid sender mailbox: {}", e))?;
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| format!("Failed to build message: {}", e))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP delivery failed: {}", e))?;

        let message_id = format!("smtp_{}", Uuid::new_v4());
        debug!(
            recipient = %mask_email(recipient),
            message_id = %message_id,
            subject = subject,
            "Mail handed to relay"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl CodeNotifier for SmtpMailer {
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
        let body = format!(
            "Your verification code is {}.\n\nThis code expires in 5 minutes.\n",
            code
        );
        self.send(identifier, subject, body).await
    }
}

#[async_trait]
impl NotificationMailer for SmtpMailer {
    async fn send_lifecycle(
        &self,
        recipient: &str,
        display_name: &str,
        event: &LifecycleEvent,
    ) -> Result<String, String> {
        let (subject, body) = render_lifecycle(display_name, event);
        self.send(recipient, &subject, body).await
    }

    async fn send_digest(&self, recipient: &str, stats: &UserStats) -> Result<String, String> {
        let subject = format!(
            "Daily User Insights - {}",
            stats.generated_at.format("%Y-%m-%d")
        );
        self.send(recipient, &subject, render_digest(stats)).await
    }
}

fn render_lifecycle(display_name: &str, event: &LifecycleEvent) -> (String, String) {
    match event {
        LifecycleEvent::Welcome => (
            "Welcome aboard".to_string(),
            format!("Hello {},\n\nYour account is ready to use.\n", display_name),
        ),
        LifecycleEvent::PurchaseConfirmation { plan, valid_until } => {
            let until = valid_until
                .map(|d| format!(" until {}", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            (
                "Your premium subscription is active".to_string(),
                format!(
                    "Hello {},\n\nYour {} plan is active{}.\n",
                    display_name, plan, until
                ),
            )
        }
        LifecycleEvent::PasswordChanged => (
            "Your password has been updated".to_string(),
            format!(
                "Hello {},\n\nYour password was changed. If this wasn't you, contact support immediately.\n",
                display_name
            ),
        ),
        LifecycleEvent::AccountDeleted => (
            "Your account has been deleted".to_string(),
            format!(
                "Hello {},\n\nYour account has been permanently deleted. You're welcome back any time.\n",
                display_name
            ),
        ),
        LifecycleEvent::MembershipCancelled => (
            "Your premium membership has been cancelled".to_string(),
            format!(
                "Hello {},\n\nYour premium membership was cancelled. Basic features remain available.\n",
                display_name
            ),
        ),
        LifecycleEvent::TrialEnding => (
            "Your trial ends tomorrow".to_string(),
            format!(
                "Hello {},\n\nYour trial ends tomorrow. Upgrade to keep premium features.\n",
                display_name
            ),
        ),
    }
}

fn render_digest(stats: &UserStats) -> String {
    let line = |label: &str, s: &tk_core::services::digest::PeriodStats| {
        format!(
            "{:<14} {:>6} new, {:>5} premium ({:.1}%)\n",
            label,
            s.total,
            s.premium,
            s.conversion_rate()
        )
    };
    format!(
        "User growth as of {}\n\n{}{}{}{}{}",
        stats.generated_at.format("%Y-%m-%d %H:%M UTC"),
        line("Last 24 hours", &stats.daily),
        line("Last 7 days", &stats.weekly),
        line("Last 30 days", &stats.monthly),
        line("Last year", &stats.yearly),
        line("All time", &stats.all_time),
    )
}
