//! News model - articles shown on the public site and pushed to the
//! member app on publish.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A news article
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NewsItem {
    pub id: String,

    // Content
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub cover_image_url: Option<String>,

    // Presentation
    pub published: bool,
    pub display_order: i64,
    pub view_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin upsert payload for a news article
#[derive(Debug, Clone, Deserialize)]
pub struct NewsInput {
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub display_order: i64,
}

impl NewsItem {
    /// Find an article by id
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let item = sqlx::query_as::<_, Self>("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(item)
    }

    /// Published articles in presentation order
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, Self>(
            "SELECT * FROM news WHERE published = true
             ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    /// All articles, drafts included, for the admin console
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let items = sqlx::query_as::<_, Self>(
            "SELECT * FROM news ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    /// Insert-or-update by id
    pub async fn upsert(id: &str, input: NewsInput, pool: &PgPool) -> Result<Self> {
        let item = sqlx::query_as::<_, Self>(
            "INSERT INTO news (id, title, excerpt, body, cover_image_url, published, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                 title = EXCLUDED.title,
                 excerpt = EXCLUDED.excerpt,
                 body = EXCLUDED.body,
                 cover_image_url = EXCLUDED.cover_image_url,
                 published = EXCLUDED.published,
                 display_order = EXCLUDED.display_order,
                 updated_at = now()
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.body)
        .bind(&input.cover_image_url)
        .bind(input.published)
        .bind(input.display_order)
        .fetch_one(pool)
        .await?;
        Ok(item)
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn delete(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the public view counter
    pub async fn increment_views(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("UPDATE news SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
