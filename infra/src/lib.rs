//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TalentKit backend.
//! It provides concrete implementations for the external collaborators the
//! core services depend on:
//!
//! - **Store**: Redis-backed and in-memory verification record stores
//! - **Mailer**: SMTP transport via lettre, and a console mock for
//!   development
//!
//! ## Features
//!
//! - `smtp-mailer`: Enable the lettre-based SMTP mailer (default)

/// Verification record store implementations
pub mod store;

/// Mail transport implementations
pub mod mailer;

/// Load infrastructure configuration from the environment
///
/// Reads a `.env` file when present, then environment variables.
pub fn load_config() -> tk_shared::config::AppConfig {
    dotenvy::dotenv().ok();
    tk_shared::config::AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Store connection or command error
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Mail transport error
    #[error("Mailer error: {0}")]
    Mailer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
