//! Mirror service implementation

use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing;

use crate::domain::entities::mirror_request::{MirrorOperation, MirrorRequest};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::DocumentStore;
use crate::services::clock::Clock;

/// Applies mirror requests against the parent account's collections
pub struct MirrorService<D, C>
where
    D: DocumentStore,
    C: Clock,
{
    /// Per-account document collections
    documents: Arc<D>,
    /// Time source for the mirrored-at stamp
    clock: Arc<C>,
}

impl<D, C> MirrorService<D, C>
where
    D: DocumentStore,
    C: Clock,
{
    /// Create a new mirror service
    pub fn new(documents: Arc<D>, clock: Arc<C>) -> Self {
        Self { documents, clock }
    }

    /// Apply a mirror request to the parent account
    ///
    /// `Add` replaces the parent's document, `Update` merges into it, and
    /// `Delete` removes it. Written payloads are stamped with the originating
    /// sub-user id and the mirroring time.
    pub async fn mirror(&self, request: &MirrorRequest) -> DomainResult<()> {
        if request.collection.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Mirror target collection is required".to_string(),
            });
        }
        if request.document_id.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Mirror target document id is required".to_string(),
            });
        }

        match request.operation {
            MirrorOperation::Add | MirrorOperation::Update => {
                let payload = self.stamped_payload(request)?;
                let merge = request.operation == MirrorOperation::Update;
                self.documents
                    .set(
                        request.parent_user_id,
                        &request.collection,
                        &request.document_id,
                        payload,
                        merge,
                    )
                    .await?;
            }
            MirrorOperation::Delete => {
                self.documents
                    .delete(
                        request.parent_user_id,
                        &request.collection,
                        &request.document_id,
                    )
                    .await?;
            }
        }

        tracing::info!(
            request_id = %request.id,
            user_id = %request.user_id,
            parent_user_id = %request.parent_user_id,
            collection = %request.collection,
            operation = ?request.operation,
            event = "document_mirrored",
            "Mirrored sub-user document to parent account"
        );
        Ok(())
    }

    /// Process a queued mirror request
    ///
    /// Returns the request transitioned to `Completed` or `Failed`; writing
    /// the updated request back to its queue is the caller's concern.
    pub async fn process(&self, mut request: MirrorRequest) -> MirrorRequest {
        match self.mirror(&request).await {
            Ok(()) => request.mark_completed(self.clock.now()),
            Err(e) => {
                tracing::error!(
                    request_id = %request.id,
                    error = %e,
                    event = "mirror_request_failed",
                    "Failed to process mirror request"
                );
                request.mark_failed(e.to_string(), self.clock.now());
            }
        }
        request
    }

    /// Payload with tracking fields added
    ///
    /// Only JSON objects can carry the tracking fields, so scalar or array
    /// payloads are rejected as validation errors.
    fn stamped_payload(&self, request: &MirrorRequest) -> DomainResult<Value> {
        let mut fields: Map<String, Value> = match &request.payload {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                return Err(DomainError::Validation {
                    message: "Mirror payload must be a JSON object".to_string(),
                })
            }
        };

        fields.insert(
            "original_creator_id".to_string(),
            json!(request.user_id),
        );
        fields.insert("mirrored_at".to_string(), json!(self.clock.now()));
        Ok(Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::mirror_request::MirrorStatus;
    use crate::repositories::InMemoryDocumentStore;
    use crate::services::clock::ManualClock;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn setup() -> (
        MirrorService<InMemoryDocumentStore, ManualClock>,
        Arc<InMemoryDocumentStore>,
    ) {
        let documents = Arc::new(InMemoryDocumentStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        ));
        let service = MirrorService::new(documents.clone(), clock);
        (service, documents)
    }

    fn request(operation: MirrorOperation, payload: Value) -> MirrorRequest {
        MirrorRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "contracts",
            "doc-1",
            payload,
            operation,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_add_writes_stamped_document() {
        let (service, documents) = setup();
        let req = request(MirrorOperation::Add, json!({"title": "Contract"}));

        service.mirror(&req).await.unwrap();

        let doc = documents
            .get(req.parent_user_id, "contracts", "doc-1")
            .await
            .unwrap();
        assert_eq!(doc["title"], json!("Contract"));
        assert_eq!(doc["original_creator_id"], json!(req.user_id));
        assert!(doc.get("mirrored_at").is_some());
    }

    #[tokio::test]
    async fn test_update_merges_into_existing_document() {
        let (service, documents) = setup();
        let add = request(MirrorOperation::Add, json!({"title": "Contract", "state": "draft"}));
        service.mirror(&add).await.unwrap();

        let mut update = request(MirrorOperation::Update, json!({"state": "signed"}));
        update.parent_user_id = add.parent_user_id;
        service.mirror(&update).await.unwrap();

        let doc = documents
            .get(add.parent_user_id, "contracts", "doc-1")
            .await
            .unwrap();
        assert_eq!(doc["title"], json!("Contract"));
        assert_eq!(doc["state"], json!("signed"));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let (service, documents) = setup();
        let add = request(MirrorOperation::Add, json!({"title": "Contract"}));
        service.mirror(&add).await.unwrap();

        let mut delete = request(MirrorOperation::Delete, Value::Null);
        delete.parent_user_id = add.parent_user_id;
        service.mirror(&delete).await.unwrap();

        assert!(documents
            .get(add.parent_user_id, "contracts", "doc-1")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_non_object_payload_rejected() {
        let (service, documents) = setup();
        let req = request(MirrorOperation::Add, json!([1, 2, 3]));

        let result = service.mirror(&req).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(documents.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_collection_rejected() {
        let (service, _documents) = setup();
        let mut req = request(MirrorOperation::Add, json!({}));
        req.collection = "  ".to_string();

        let result = service.mirror(&req).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_process_marks_completed() {
        let (service, _documents) = setup();
        let req = request(MirrorOperation::Add, json!({"title": "Contract"}));

        let processed = service.process(req).await;
        assert_eq!(processed.status, MirrorStatus::Completed);
        assert!(processed.processed_at.is_some());
        assert!(processed.error.is_none());
    }

    #[tokio::test]
    async fn test_process_marks_failed_with_error() {
        let (service, _documents) = setup();
        let req = request(MirrorOperation::Add, json!("not an object"));

        let processed = service.process(req).await;
        assert_eq!(processed.status, MirrorStatus::Failed);
        assert!(processed
            .error
            .as_deref()
            .unwrap()
            .contains("JSON object"));
    }
}
