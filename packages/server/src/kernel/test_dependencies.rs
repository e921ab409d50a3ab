// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{BasePushService, ServerDeps};

// =============================================================================
// Mock Push Service
// =============================================================================

/// A notification captured by the mock push service
#[derive(Debug, Clone)]
pub struct SentNotification {
    pub topic: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

pub struct MockPushService {
    sent_notifications: Arc<Mutex<Vec<SentNotification>>>,
}

impl MockPushService {
    pub fn new() -> Self {
        Self {
            sent_notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all notifications that were sent
    pub fn sent_notifications(&self) -> Vec<SentNotification> {
        self.sent_notifications.lock().unwrap().clone()
    }

    /// Get the number of dispatch calls
    pub fn sent_count(&self) -> usize {
        self.sent_notifications.lock().unwrap().len()
    }

    /// Check if a notification was sent with the given title
    pub fn was_sent_with_title(&self, title: &str) -> bool {
        self.sent_notifications
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.title == title)
    }

    /// Check if anything was sent to the given topic
    pub fn was_sent_to_topic(&self, topic: &str) -> bool {
        self.sent_notifications
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.topic == topic)
    }
}

impl Default for MockPushService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePushService for MockPushService {
    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        self.sent_notifications.lock().unwrap().push(SentNotification {
            topic: topic.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        });
        Ok(())
    }
}

// =============================================================================
// Failing Push Service
// =============================================================================

/// Push service whose every dispatch fails. Used to pin the invariant that a
/// dispatch failure never reverses or surfaces from the publish write.
pub struct FailingPushService {
    attempts: Arc<Mutex<usize>>,
}

impl FailingPushService {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of dispatches attempted against this service
    pub fn attempt_count(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Default for FailingPushService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePushService for FailingPushService {
    async fn send_to_topic(
        &self,
        _topic: &str,
        _title: &str,
        _body: &str,
        _data: serde_json::Value,
    ) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        anyhow::bail!("push gateway unavailable")
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub push_service: Arc<MockPushService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            push_service: Arc::new(MockPushService::new()),
        }
    }

    /// Set a mock push service
    pub fn mock_push(mut self, service: MockPushService) -> Self {
        self.push_service = Arc::new(service);
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(db_pool, self.push_service)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
