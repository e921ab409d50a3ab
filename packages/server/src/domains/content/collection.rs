//! Ordered-collection reconciler.
//!
//! The admin screens persist drag-and-drop ordering as a batch of
//! `{id, display_order}` point-writes against one of the four content tables.
//! Writes are applied one at a time in batch order and the remaining batch is
//! abandoned on the first store failure; completed writes stay applied (no
//! transaction spans the batch). Concurrent batches against the same table
//! interleave at the row level, last writer wins per row.

use anyhow::Result;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::notification::Topic;
use super::ContentError;

/// The four orderable/publishable content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedCollection {
    News,
    Events,
    Projects,
    Downloads,
}

impl OrderedCollection {
    /// Parse a URL path segment into a collection.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "news" => Some(Self::News),
            "events" => Some(Self::Events),
            "projects" => Some(Self::Projects),
            "downloads" => Some(Self::Downloads),
            _ => None,
        }
    }

    /// Backing table name. Only ever interpolated from this fixed set.
    pub fn table(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Events => "events",
            Self::Projects => "projects",
            Self::Downloads => "downloads",
        }
    }

    /// Notification topic for the kind, if subscribers can follow it.
    /// Projects and downloads have no topic: publishing them never notifies.
    pub fn topic(&self) -> Option<Topic> {
        match self {
            Self::News => Some(Topic::News),
            Self::Events => Some(Topic::Events),
            Self::Projects | Self::Downloads => None,
        }
    }

    /// Notification title prefix for the kind.
    pub fn notification_prefix(&self) -> &'static str {
        match self {
            Self::News => "Nova notícia: ",
            Self::Events => "Novo evento: ",
            Self::Projects | Self::Downloads => "",
        }
    }

    /// Deep link opened when the notification is tapped.
    pub fn deep_link(&self) -> &'static str {
        match self {
            Self::News => "/noticias",
            Self::Events => "/agenda",
            Self::Projects => "/projetos",
            Self::Downloads => "/downloads",
        }
    }
}

impl std::fmt::Display for OrderedCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// One well-formed element of a reorder batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderUpdate {
    pub id: String,
    pub display_order: i64,
}

/// Extract the update sequence from a reorder request body.
///
/// The batch arrives under an `items` or `updates` key. A top-level value
/// that is not a sequence is rejected; elements without a non-empty string
/// `id` and a numeric `display_order` are skipped so one malformed element
/// never blocks the rest of the batch.
pub fn parse_reorder_payload(payload: &serde_json::Value) -> Result<Vec<ReorderUpdate>, ContentError> {
    let batch = payload
        .get("items")
        .or_else(|| payload.get("updates"))
        .unwrap_or(payload);

    let elements = batch.as_array().ok_or_else(|| {
        ContentError::InvalidPayload("reorder payload must be a list of updates".to_string())
    })?;

    let mut updates = Vec::with_capacity(elements.len());
    for element in elements {
        let id = element
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty());
        let display_order = element
            .get("display_order")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)));

        match (id, display_order) {
            (Some(id), Some(display_order)) => updates.push(ReorderUpdate {
                id: id.to_string(),
                display_order,
            }),
            _ => {
                debug!(element = %element, "Skipping malformed reorder element");
            }
        }
    }

    Ok(updates)
}

/// Apply a reorder batch against the collection's table.
///
/// Each update is an independent point-write keyed by id, setting
/// `display_order` and touching `updated_at`. An id matching no row is not an
/// error. On a store failure the failing id is reported and the remaining
/// batch is not attempted.
pub async fn apply_reorder(
    collection: OrderedCollection,
    updates: &[ReorderUpdate],
    pool: &PgPool,
) -> Result<(), ContentError> {
    let query = format!(
        "UPDATE {} SET display_order = $1, updated_at = now() WHERE id = $2",
        collection.table()
    );

    for update in updates {
        if let Err(e) = sqlx::query(&query)
            .bind(update.display_order)
            .bind(&update.id)
            .execute(pool)
            .await
        {
            warn!(
                collection = %collection,
                id = %update.id,
                error = %e,
                "Reorder write failed, abandoning remaining batch"
            );
            return Err(ContentError::WriteFailed {
                id: update.id.clone(),
                source: e,
            });
        }
    }

    debug!(collection = %collection, count = updates.len(), "Reorder batch applied");
    Ok(())
}
