//! Notifier trait for verification code delivery

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Outbound channel that delivers a verification code to an identifier
///
/// Message content and template selection are the notifier's concern; the
/// issuance metadata is passed through unchanged so the notifier can pick an
/// alternate template (e.g. for a federated sign-in flow).
#[async_trait]
pub trait CodeNotifier: Send + Sync {
    /// Deliver a code, returning the transport message id
    async fn send_code(
        &self,
        identifier: &str,
        code: &str,
        metadata: &HashMap<String, Value>,
    ) -> Result<String, String>;
}
