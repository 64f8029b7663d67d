//! End-to-end tests for the verification code lifecycle against the public
//! crate API, using a self-contained in-memory store and notifier.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tk_core::domain::entities::verification_record::VerificationRecord;
use tk_core::errors::VerificationError;
use tk_core::repositories::VerificationStore;
use tk_core::services::clock::ManualClock;
use tk_core::services::verification::{
    CodeNotifier, VerificationService, VerificationServiceConfig,
};

#[derive(Default)]
struct MemoryStore {
    records: Mutex<HashMap<String, VerificationRecord>>,
}

#[async_trait]
impl VerificationStore for MemoryStore {
    async fn get(&self, identifier: &str) -> Result<Option<VerificationRecord>, String> {
        Ok(self.records.lock().unwrap().get(identifier).cloned())
    }

    async fn put(&self, record: &VerificationRecord) -> Result<(), String> {
        self.records
            .lock()
            .unwrap()
            .insert(record.identifier.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> Result<(), String> {
        self.records.lock().unwrap().remove(identifier);
        Ok(())
    }
}

#[derive(Default)]
struct CapturingNotifier {
    codes: Mutex<HashMap<String, String>>,
}

impl CapturingNotifier {
    fn code_for(&self, identifier: &str) -> Option<String> {
        self.codes.lock().unwrap().get(identifier).cloned()
    }
}

#[async_trait]
impl CodeNotifier for CapturingNotifier {
    async fn send_code(
        &self,
        identifier: &str,
        code: &str,
        _metadata: &HashMap<String, Value>,
    ) -> Result<String, String> {
        self.codes
            .lock()
            .unwrap()
            .insert(identifier.to_string(), code.to_string());
        Ok(format!("msg-{}", identifier))
    }
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
}

fn build_service() -> (
    VerificationService<MemoryStore, CapturingNotifier, ManualClock>,
    Arc<CapturingNotifier>,
    Arc<ManualClock>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(CapturingNotifier::default());
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = VerificationService::new(
        store,
        notifier.clone(),
        clock.clone(),
        VerificationServiceConfig::default(),
    );
    (service, notifier, clock)
}

#[tokio::test]
async fn full_lifecycle_issue_verify_consume() {
    let (service, notifier, clock) = build_service();

    let issue = service.issue("a@x.com", None).await.unwrap();
    assert_eq!(issue.issued_at, start_time());
    assert_eq!(issue.expires_at, start_time() + Duration::minutes(5));

    let code = notifier.code_for("a@x.com").unwrap();
    clock.advance(Duration::seconds(100));
    service.verify("a@x.com", &code).await.unwrap();

    clock.advance(Duration::seconds(1));
    assert_eq!(
        service.verify("a@x.com", &code).await.unwrap_err(),
        VerificationError::NotFound
    );
}

#[tokio::test]
async fn wrong_code_then_correct_code_within_ttl() {
    let (service, notifier, clock) = build_service();

    service.issue("b@x.com", None).await.unwrap();
    let code = notifier.code_for("b@x.com").unwrap();
    let wrong = if code == "999999" { "999998" } else { "999999" };

    clock.advance(Duration::seconds(10));
    assert_eq!(
        service.verify("b@x.com", wrong).await.unwrap_err(),
        VerificationError::Mismatch
    );

    clock.advance(Duration::seconds(10));
    service.verify("b@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn expiry_consumes_the_record() {
    let (service, notifier, clock) = build_service();

    service.issue("c@x.com", None).await.unwrap();
    let code = notifier.code_for("c@x.com").unwrap();

    clock.advance(Duration::seconds(301));
    assert_eq!(
        service.verify("c@x.com", &code).await.unwrap_err(),
        VerificationError::Expired
    );
    assert_eq!(
        service.verify("c@x.com", &code).await.unwrap_err(),
        VerificationError::NotFound
    );
}

#[tokio::test]
async fn reissue_replaces_the_active_code() {
    let (service, notifier, _clock) = build_service();

    service.issue("d@x.com", None).await.unwrap();
    let first = notifier.code_for("d@x.com").unwrap();

    service.issue("d@x.com", None).await.unwrap();
    let second = notifier.code_for("d@x.com").unwrap();

    if first != second {
        assert_eq!(
            service.verify("d@x.com", &first).await.unwrap_err(),
            VerificationError::Mismatch
        );
    }
    service.verify("d@x.com", &second).await.unwrap();
}

#[tokio::test]
async fn issue_rejects_blank_identifier() {
    let (service, _notifier, _clock) = build_service();

    assert!(matches!(
        service.issue("", None).await.unwrap_err(),
        VerificationError::InvalidInput { .. }
    ));
}
