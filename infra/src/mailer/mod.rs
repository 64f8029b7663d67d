//! Mail Transport Module
//!
//! This module provides the outbound mail implementations behind the core
//! `CodeNotifier` and `NotificationMailer` traits:
//!
//! - **Mock Implementation**: console output for development
//! - **SMTP Support**: production delivery via lettre (feature-gated)
//!
//! Recipient addresses are masked in logs; verification codes are never
//! logged.

pub mod mock;

// SMTP mailer (feature-gated)
#[cfg(feature = "smtp-mailer")]
pub mod smtp;

pub use mock::MockMailer;

#[cfg(feature = "smtp-mailer")]
pub use smtp::SmtpMailer;

use tk_core::services::lifecycle::NotificationMailer;
use tk_core::services::verification::CodeNotifier;
use tk_shared::config::MailerConfig;

/// Combined mail transport surface: code delivery plus notifications
pub trait Mailer: CodeNotifier + NotificationMailer {}

impl<T: CodeNotifier + NotificationMailer> Mailer for T {}

/// Create a mailer based on configuration
///
/// Returns the implementation matching the configured provider, falling
/// back to the mock mailer when the provider is unknown or cannot be
/// constructed.
pub fn create_mailer(config: &MailerConfig) -> Box<dyn Mailer> {
    match config.provider.as_str() {
        "mock" => Box::new(MockMailer::new()),
        #[cfg(feature = "smtp-mailer")]
        "smtp" => match SmtpMailer::new(config.clone()) {
            Ok(mailer) => Box::new(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP mailer: {}", e);
                tracing::warn!("Falling back to mock mailer");
                Box::new(MockMailer::new())
            }
        },
        other => {
            tracing::warn!("Unknown mailer provider '{}', using mock implementation", other);
            Box::new(MockMailer::new())
        }
    }
}
