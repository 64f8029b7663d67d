//! Mock mailer for digest service tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::services::digest::UserStats;
use crate::services::lifecycle::{LifecycleEvent, NotificationMailer};

/// Captures delivered digests; optionally fails all sends
pub struct MockDigestMailer {
    pub digests: Arc<Mutex<Vec<(String, UserStats)>>>,
    pub should_fail: bool,
}

impl MockDigestMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            digests: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.digests.lock().unwrap().len()
    }

    pub fn last_digest(&self) -> Option<(String, UserStats)> {
        self.digests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NotificationMailer for MockDigestMailer {
    async fn send_lifecycle(
        &self,
        _recipient: &str,
        _display_name: &str,
        _event: &LifecycleEvent,
    ) -> Result<String, String> {
        unreachable!("digest service never sends lifecycle notifications")
    }

    async fn send_digest(&self, recipient: &str, stats: &UserStats) -> Result<String, String> {
        if self.should_fail {
            return Err("mailer error".to_string());
        }
        let mut digests = self.digests.lock().unwrap();
        digests.push((recipient.to_string(), stats.clone()));
        Ok(format!("mock-msg-{}", digests.len()))
    }
}
