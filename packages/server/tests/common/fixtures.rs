//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use marsul_core::domains::content::models::{
    Download, DownloadInput, Event, EventInput, NewsInput, NewsItem,
};
use sqlx::PgPool;

/// Create a news article with the given publish state and rank
pub async fn create_news(
    pool: &PgPool,
    id: &str,
    title: &str,
    excerpt: &str,
    published: bool,
    display_order: i64,
) -> Result<NewsItem> {
    let item = NewsItem::upsert(
        id,
        NewsInput {
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            body: format!("{} - texto completo", title),
            cover_image_url: None,
            published,
            display_order,
        },
        pool,
    )
    .await?;
    Ok(item)
}

/// Create an agenda event
pub async fn create_event(
    pool: &PgPool,
    id: &str,
    title: &str,
    excerpt: &str,
    published: bool,
    display_order: i64,
) -> Result<Event> {
    let event = Event::upsert(
        id,
        EventInput {
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            starts_at: None,
            location: Some("Sede da associação".to_string()),
            published,
            display_order,
        },
        pool,
    )
    .await?;
    Ok(event)
}

/// Create a downloadable document
pub async fn create_download(
    pool: &PgPool,
    id: &str,
    title: &str,
    published: bool,
    display_order: i64,
) -> Result<Download> {
    let download = Download::upsert(
        id,
        DownloadInput {
            title: title.to_string(),
            excerpt: String::new(),
            file_url: format!("https://files.example.org/{}.pdf", id),
            category: Some("atas".to_string()),
            published,
            display_order,
        },
        pool,
    )
    .await?;
    Ok(download)
}

/// Fetch the persisted rank of a row in the given table
pub async fn fetch_display_order(pool: &PgPool, table: &str, id: &str) -> Result<i64> {
    let query = format!("SELECT display_order FROM {} WHERE id = $1", table);
    let rank: (i64,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
    Ok(rank.0)
}
