//! Admin console routes: reorder persistence, publish/notify, content CRUD,
//! producer directory CRUD and the payments notice.
//!
//! All handlers sit behind the admin key middleware. Request bodies arrive as
//! raw JSON and are validated here so every caller fault comes back as a
//! 400 `{"error": ...}` body.

use axum::extract::{Extension, Path};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::content::models::{
    Download, DownloadInput, Event, EventInput, NewsInput, NewsItem, Project, ProjectInput,
};
use crate::domains::content::{
    apply_reorder, notify_if_published, parse_reorder_payload, set_published, NotifyOutcome,
    OrderedCollection, Topic,
};
use crate::domains::producers::{Producer, ProducerInput};
use crate::server::app::AppState;

fn collection_from_path(slug: &str) -> Result<OrderedCollection, ApiError> {
    OrderedCollection::from_slug(slug)
        .ok_or_else(|| ApiError::not_found(format!("unknown collection: {}", slug)))
}

fn parse_body<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::bad_request(format!("invalid payload: {}", e)))
}

fn required_id(payload: &Value) -> Result<String, ApiError> {
    payload
        .get("id")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("id is required"))
}

// =============================================================================
// Reorder + publish/notify (shared by all four content kinds)
// =============================================================================

/// POST /admin/:collection/reorder
pub async fn reorder_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let collection = collection_from_path(&collection)?;
    let updates = parse_reorder_payload(&payload)?;
    apply_reorder(collection, &updates, &state.db_pool).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /admin/:collection/toggle
///
/// `{id}` flips the published flag, `{id, published}` sets it. Only the
/// draft → published transition dispatches a notification.
pub async fn toggle_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let collection = collection_from_path(&collection)?;
    let id = required_id(&payload)?;
    let target = match payload.get("published") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => return Err(ApiError::bad_request("published must be a boolean")),
    };

    let outcome = set_published(collection, &id, target, &state.deps).await?;
    Ok(Json(json!({ "success": true, "entity": outcome.entity })))
}

/// POST /admin/:collection/notify
pub async fn notify_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let collection = collection_from_path(&collection)?;
    let id = required_id(&payload)?;

    match notify_if_published(collection, &id, &state.deps).await? {
        NotifyOutcome::Dispatched => Ok(Json(json!({ "success": true }))),
        NotifyOutcome::Skipped(reason) => {
            Ok(Json(json!({ "success": true, "skipped": reason })))
        }
    }
}

// =============================================================================
// Payments notice
// =============================================================================

/// POST /admin/payments/notice
///
/// Pushes a dues notice to the `payments` topic. Like every notification,
/// delivery is advisory: a gateway failure is logged and the response still
/// reports success.
pub async fn payment_notice_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let title = payload
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("title is required"))?;
    let body = payload
        .get("body")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("body is required"))?;

    if let Err(e) = state
        .deps
        .push_service
        .send_to_topic(Topic::Payments.as_str(), title, body, json!({ "url": "/pagamentos" }))
        .await
    {
        warn!(error = %e, "Payment notice dispatch failed");
    }

    Ok(Json(json!({ "success": true })))
}

// =============================================================================
// Content CRUD
// =============================================================================

/// GET /admin/:collection - all rows, drafts included
pub async fn admin_list_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Value>> {
    let pool = &state.db_pool;
    let rows = match collection_from_path(&collection)? {
        OrderedCollection::News => serde_json::to_value(NewsItem::list_all(pool).await?),
        OrderedCollection::Events => serde_json::to_value(Event::list_all(pool).await?),
        OrderedCollection::Projects => serde_json::to_value(Project::list_all(pool).await?),
        OrderedCollection::Downloads => serde_json::to_value(Download::list_all(pool).await?),
    }
    .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(rows))
}

async fn upsert_entity(
    state: &AppState,
    collection: OrderedCollection,
    id: &str,
    payload: Value,
) -> ApiResult<Value> {
    let pool = &state.db_pool;
    let entity = match collection {
        OrderedCollection::News => {
            serde_json::to_value(NewsItem::upsert(id, parse_body::<NewsInput>(payload)?, pool).await?)
        }
        OrderedCollection::Events => {
            serde_json::to_value(Event::upsert(id, parse_body::<EventInput>(payload)?, pool).await?)
        }
        OrderedCollection::Projects => {
            serde_json::to_value(Project::upsert(id, parse_body::<ProjectInput>(payload)?, pool).await?)
        }
        OrderedCollection::Downloads => {
            serde_json::to_value(Download::upsert(id, parse_body::<DownloadInput>(payload)?, pool).await?)
        }
    }
    .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(entity)
}

/// POST /admin/:collection - create with a generated id
pub async fn create_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let collection = collection_from_path(&collection)?;
    let id = Uuid::now_v7().to_string();
    let entity = upsert_entity(&state, collection, &id, payload).await?;
    Ok(Json(json!({ "success": true, "entity": entity })))
}

/// PUT /admin/:collection/:id - insert-or-update by id
pub async fn upsert_handler(
    Extension(state): Extension<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let collection = collection_from_path(&collection)?;
    let entity = upsert_entity(&state, collection, &id, payload).await?;
    Ok(Json(json!({ "success": true, "entity": entity })))
}

/// DELETE /admin/:collection/:id
pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let pool = &state.db_pool;
    let removed = match collection_from_path(&collection)? {
        OrderedCollection::News => NewsItem::delete(&id, pool).await?,
        OrderedCollection::Events => Event::delete(&id, pool).await?,
        OrderedCollection::Projects => Project::delete(&id, pool).await?,
        OrderedCollection::Downloads => Download::delete(&id, pool).await?,
    };

    if !removed {
        return Err(ApiError::not_found(format!("record not found: {}", id)));
    }
    Ok(Json(json!({ "success": true })))
}

// =============================================================================
// Producer directory CRUD
// =============================================================================

/// GET /admin/producers
pub async fn admin_list_producers_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    let producers = Producer::list_all(&state.db_pool).await?;
    Ok(Json(serde_json::to_value(producers).map_err(|e| ApiError::internal(e.to_string()))?))
}

async fn upsert_producer(state: &AppState, id: &str, payload: Value) -> ApiResult<Value> {
    let input: ProducerInput = parse_body(payload)?;

    // Resolve the map pin up front; a geocoding failure leaves it empty and
    // never fails the write.
    let coords = match crate::common::utils::geocode_community(&input.community, &input.municipality)
        .await
    {
        Ok(location) => Some((location.latitude, location.longitude)),
        Err(e) => {
            warn!(community = %input.community, error = %e, "Geocoding failed, keeping previous map pin");
            None
        }
    };

    let producer = Producer::upsert(id, input, coords, &state.db_pool).await?;
    serde_json::to_value(producer).map_err(|e| ApiError::internal(e.to_string()))
}

/// POST /admin/producers - create with a generated id
pub async fn create_producer_handler(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let id = Uuid::now_v7().to_string();
    let producer = upsert_producer(&state, &id, payload).await?;
    Ok(Json(json!({ "success": true, "entity": producer })))
}

/// PUT /admin/producers/:id
pub async fn upsert_producer_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let producer = upsert_producer(&state, &id, payload).await?;
    Ok(Json(json!({ "success": true, "entity": producer })))
}

/// DELETE /admin/producers/:id
pub async fn delete_producer_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !Producer::delete(&id, &state.db_pool).await? {
        return Err(ApiError::not_found(format!("record not found: {}", id)));
    }
    Ok(Json(json!({ "success": true })))
}
