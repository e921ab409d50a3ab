//! Publish-and-notify workflow.
//!
//! Toggling `published` writes the new flag to the store and, only on the
//! draft → published transition, composes and dispatches a topic
//! notification. The publish write is the durable, authoritative outcome;
//! dispatch is awaited but best-effort, and a dispatch failure never blocks
//! or reverses it.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::kernel::ServerDeps;

use super::collection::OrderedCollection;
use super::notification::{compose, NotificationMessage};
use super::ContentError;

/// The publishable fields shared by all four content tables.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PublishableRow {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub published: bool,
}

/// Result of a toggle/set operation.
#[derive(Debug)]
pub struct PublishOutcome {
    /// The entity after the write.
    pub entity: PublishableRow,
    /// Whether this call transitioned the entity from draft to published.
    pub became_published: bool,
}

/// Result of an explicit notify request.
#[derive(Debug)]
pub enum NotifyOutcome {
    Dispatched,
    /// Nothing was dispatched; the reason is reported to the caller.
    Skipped(&'static str),
}

async fn read_row(
    collection: OrderedCollection,
    id: &str,
    pool: &PgPool,
) -> Result<PublishableRow, ContentError> {
    let query = format!(
        "SELECT id, title, excerpt, published FROM {} WHERE id = $1",
        collection.table()
    );
    sqlx::query_as::<_, PublishableRow>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ContentError::NotFound(id.to_string()))
}

async fn dispatch(message: NotificationMessage, deps: &ServerDeps) {
    let result = deps
        .push_service
        .send_to_topic(
            message.topic.as_str(),
            &message.title,
            &message.body,
            serde_json::json!({ "url": message.url }),
        )
        .await;

    match result {
        Ok(()) => info!(topic = %message.topic, "Publish notification dispatched"),
        // Notifications are advisory; the publish state change stands.
        Err(e) => warn!(topic = %message.topic, error = %e, "Publish notification dispatch failed"),
    }
}

/// Set (or flip, when `target` is `None`) the entity's `published` flag.
///
/// The entity is read first so the draft → published transition can be
/// detected; writing the value already held is a no-op from the store's
/// perspective and dispatches nothing.
pub async fn set_published(
    collection: OrderedCollection,
    id: &str,
    target: Option<bool>,
    deps: &ServerDeps,
) -> Result<PublishOutcome, ContentError> {
    let current = read_row(collection, id, &deps.db_pool).await?;
    let new_value = target.unwrap_or(!current.published);

    let query = format!(
        "UPDATE {} SET published = $1, updated_at = now() WHERE id = $2",
        collection.table()
    );
    sqlx::query(&query)
        .bind(new_value)
        .bind(id)
        .execute(&deps.db_pool)
        .await?;

    let became_published = new_value && !current.published;
    if became_published {
        if let Some(message) = compose(collection, &current.title, &current.excerpt) {
            dispatch(message, deps).await;
        }
    }

    Ok(PublishOutcome {
        entity: PublishableRow {
            published: new_value,
            ..current
        },
        became_published,
    })
}

/// Re-read the entity and dispatch its notification if it is published and
/// its kind has a topic. Never fails on dispatch errors.
pub async fn notify_if_published(
    collection: OrderedCollection,
    id: &str,
    deps: &ServerDeps,
) -> Result<NotifyOutcome, ContentError> {
    let row = read_row(collection, id, &deps.db_pool).await?;

    if !row.published {
        return Ok(NotifyOutcome::Skipped("entity is not published"));
    }

    match compose(collection, &row.title, &row.excerpt) {
        Some(message) => {
            dispatch(message, deps).await;
            Ok(NotifyOutcome::Dispatched)
        }
        None => Ok(NotifyOutcome::Skipped("collection has no notification topic")),
    }
}
