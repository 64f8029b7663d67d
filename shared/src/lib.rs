//! Shared utilities and common types for the TalentKit server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures
//! - Utility functions (email validation, masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, MailerConfig, StoreConfig};
pub use types::ApiResponse;
pub use utils::{email, validation};
