//! Document store trait for per-account collections.
//!
//! Documents are addressed by `(owner, collection, document_id)`. The
//! mirroring service is the only consumer; it copies sub-user documents into
//! the parent account's collections.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::DomainError;

/// Storage for JSON documents organized into per-owner collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a document
    ///
    /// With `merge` set, object fields in `value` are merged into the
    /// existing document (absent documents are created); otherwise the
    /// document is replaced wholesale.
    async fn set(
        &self,
        owner: Uuid,
        collection: &str,
        document_id: &str,
        value: Value,
        merge: bool,
    ) -> Result<(), DomainError>;

    /// Delete a document
    ///
    /// Deleting an absent document is not an error.
    async fn delete(
        &self,
        owner: Uuid,
        collection: &str,
        document_id: &str,
    ) -> Result<(), DomainError>;
}
