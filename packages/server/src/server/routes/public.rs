//! Public site routes. Listings only ever return published rows.

use axum::extract::{Extension, Path};
use axum::Json;
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult};
use crate::domains::content::models::{Download, Event, NewsItem, Project};
use crate::domains::content::OrderedCollection;
use crate::domains::producers::Producer;
use crate::server::app::AppState;

fn collection_from_path(slug: &str) -> Result<OrderedCollection, ApiError> {
    OrderedCollection::from_slug(slug)
        .ok_or_else(|| ApiError::not_found(format!("unknown collection: {}", slug)))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

/// GET /api/:collection - published rows in presentation order
pub async fn public_list_handler(
    Extension(state): Extension<AppState>,
    Path(collection): Path<String>,
) -> ApiResult<Json<Value>> {
    let pool = &state.db_pool;
    let rows = match collection_from_path(&collection)? {
        OrderedCollection::News => to_json(NewsItem::list_published(pool).await?)?,
        OrderedCollection::Events => to_json(Event::list_published(pool).await?)?,
        OrderedCollection::Projects => to_json(Project::list_published(pool).await?)?,
        OrderedCollection::Downloads => to_json(Download::list_published(pool).await?)?,
    };
    Ok(Json(rows))
}

/// GET /api/:collection/:id - a single published row, 404 for drafts
pub async fn public_detail_handler(
    Extension(state): Extension<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let pool = &state.db_pool;
    let not_found = || ApiError::not_found(format!("record not found: {}", id));

    let row = match collection_from_path(&collection)? {
        OrderedCollection::News => {
            let item = NewsItem::find_by_id(&id, pool).await?.ok_or_else(not_found)?;
            if !item.published {
                return Err(not_found());
            }
            to_json(item)?
        }
        OrderedCollection::Events => {
            let event = Event::find_by_id(&id, pool).await?.ok_or_else(not_found)?;
            if !event.published {
                return Err(not_found());
            }
            to_json(event)?
        }
        OrderedCollection::Projects => {
            let project = Project::find_by_id(&id, pool).await?.ok_or_else(not_found)?;
            if !project.published {
                return Err(not_found());
            }
            to_json(project)?
        }
        OrderedCollection::Downloads => {
            let download = Download::find_by_id(&id, pool).await?.ok_or_else(not_found)?;
            if !download.published {
                return Err(not_found());
            }
            to_json(download)?
        }
    };
    Ok(Json(row))
}

/// POST /api/news/:id/view - increment the article's view counter
pub async fn view_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    if !NewsItem::increment_views(&id, &state.db_pool).await? {
        return Err(ApiError::not_found(format!("record not found: {}", id)));
    }
    Ok(Json(json!({ "success": true })))
}

/// GET /api/producers - active producers for the public directory
pub async fn public_producers_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    let producers = Producer::list_active(&state.db_pool).await?;
    Ok(Json(to_json(producers)?))
}
