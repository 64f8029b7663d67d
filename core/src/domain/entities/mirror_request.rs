//! Mirror request entity for copying sub-user documents to a parent account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Operation to apply against the parent account's collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorOperation {
    /// Write the document, replacing any existing content
    Add,
    /// Merge the payload into the existing document
    Update,
    /// Remove the document
    Delete,
}

/// Processing state of a queued mirror request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorStatus {
    Pending,
    Completed,
    Failed,
}

/// A request to mirror one document from a sub-user into the parent account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorRequest {
    /// Unique identifier for the request
    pub id: Uuid,

    /// The sub-user whose document is being mirrored
    pub user_id: Uuid,

    /// The parent account receiving the copy
    pub parent_user_id: Uuid,

    /// Target collection under the parent account
    pub collection: String,

    /// Target document id within the collection
    pub document_id: String,

    /// Document content; opaque to the mirroring logic
    pub payload: Value,

    /// Operation to perform
    pub operation: MirrorOperation,

    /// Processing state
    pub status: MirrorStatus,

    /// Failure description when `status` is `Failed`
    pub error: Option<String>,

    /// When the request was created
    pub requested_at: DateTime<Utc>,

    /// When processing finished
    pub processed_at: Option<DateTime<Utc>>,
}

impl MirrorRequest {
    /// Create a pending mirror request
    pub fn new(
        user_id: Uuid,
        parent_user_id: Uuid,
        collection: impl Into<String>,
        document_id: impl Into<String>,
        payload: Value,
        operation: MirrorOperation,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            parent_user_id,
            collection: collection.into(),
            document_id: document_id.into(),
            payload,
            operation,
            status: MirrorStatus::Pending,
            error: None,
            requested_at,
            processed_at: None,
        }
    }

    /// Mark the request as successfully processed
    pub fn mark_completed(&mut self, at: DateTime<Utc>) {
        self.status = MirrorStatus::Completed;
        self.error = None;
        self.processed_at = Some(at);
    }

    /// Mark the request as failed
    pub fn mark_failed(&mut self, error: impl Into<String>, at: DateTime<Utc>) {
        self.status = MirrorStatus::Failed;
        self.error = Some(error.into());
        self.processed_at = Some(at);
    }
}
