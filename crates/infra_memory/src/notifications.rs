//! Notification sink adapters

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

use domain_claims::{NotificationSink, StatusNotification};

/// Sink that logs each notification; the production default
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, notification: StatusNotification) {
        info!(
            claim_id = %notification.claim_id,
            status = %notification.status,
            "{}",
            notification.message
        );
    }
}

/// Sink that records notifications for assertions in tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<StatusNotification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far
    pub fn sent(&self) -> Vec<StatusNotification> {
        self.sent.lock().expect("sink poisoned").clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, notification: StatusNotification) {
        self.sent.lock().expect("sink poisoned").push(notification);
    }
}
