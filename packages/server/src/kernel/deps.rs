//! Server dependencies (using traits for testability)
//!
//! Central dependency container handed to the route handlers. External
//! services sit behind trait abstractions so tests can swap in mocks.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::utils::PushClient;
use crate::kernel::BasePushService;

// =============================================================================
// PushClient Adapter (implements BasePushService trait)
// =============================================================================

#[async_trait]
impl BasePushService for PushClient {
    async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        PushClient::send_to_topic(self, topic, title, body, data).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to request handlers
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub push_service: Arc<dyn BasePushService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(db_pool: PgPool, push_service: Arc<dyn BasePushService>) -> Self {
        Self {
            db_pool,
            push_service,
        }
    }
}
