//! Error type definitions for verification and messaging operations
//!
//! Every failure kind a caller may want to branch on gets its own variant;
//! entry points map these onto transport-level responses via the stable
//! error codes. The verification code itself never appears in an error.

use thiserror::Error;

use tk_shared::types::response::{ApiResponse, ErrorBody};

/// Verification code lifecycle errors
///
/// `Mismatch` retains the stored record so the caller may retry within the
/// TTL window; `Expired` and a successful verification both consume it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid input: {field}")]
    InvalidInput { field: String },

    #[error("No verification code found")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    #[error("Invalid verification code")]
    Mismatch,

    #[error("Verification store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Mail transport unavailable: {message}")]
    NotifierUnavailable { message: String },
}

impl VerificationError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::InvalidInput { .. } => "INVALID_INPUT",
            VerificationError::NotFound => "CODE_NOT_FOUND",
            VerificationError::Expired => "CODE_EXPIRED",
            VerificationError::Mismatch => "CODE_MISMATCH",
            VerificationError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            VerificationError::NotifierUnavailable { .. } => "NOTIFIER_UNAVAILABLE",
        }
    }

    /// Whether re-issuing a fresh code is the right caller recovery
    pub fn should_reissue(&self) -> bool {
        matches!(self, VerificationError::NotFound | VerificationError::Expired)
    }
}

impl From<&VerificationError> for ErrorBody {
    fn from(err: &VerificationError) -> Self {
        ErrorBody {
            code: err.error_code().to_string(),
        }
    }
}

impl From<VerificationError> for ApiResponse<()> {
    fn from(err: VerificationError) -> Self {
        ApiResponse::error(err.error_code(), err.to_string())
    }
}

/// Notification delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Mail transport failure: {message}")]
    Transport { message: String },

    #[error("Unknown notification recipient: {recipient}")]
    UnknownRecipient { recipient: String },
}

impl NotificationError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            NotificationError::Transport { .. } => "MAIL_TRANSPORT_FAILURE",
            NotificationError::UnknownRecipient { .. } => "UNKNOWN_RECIPIENT",
        }
    }
}
