// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "notify on publish") lives in domain functions that
// use these traits.
//
// Naming convention: Base* for trait names (e.g., BasePushService)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Push Notification Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BasePushService: Send + Sync {
    /// Send a push notification to every subscriber of a topic
    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()>;
}
