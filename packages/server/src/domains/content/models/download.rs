//! Download model - documents (statutes, minutes, forms) offered on the
//! public downloads page.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Download {
    pub id: String,

    pub title: String,
    pub excerpt: String,
    pub file_url: String,
    pub category: Option<String>,

    pub published: bool,
    pub display_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadInput {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub file_url: String,
    pub category: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub display_order: i64,
}

impl Download {
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let download = sqlx::query_as::<_, Self>("SELECT * FROM downloads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(download)
    }

    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>> {
        let downloads = sqlx::query_as::<_, Self>(
            "SELECT * FROM downloads WHERE published = true
             ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(downloads)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let downloads = sqlx::query_as::<_, Self>(
            "SELECT * FROM downloads ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(downloads)
    }

    pub async fn upsert(id: &str, input: DownloadInput, pool: &PgPool) -> Result<Self> {
        let download = sqlx::query_as::<_, Self>(
            "INSERT INTO downloads (id, title, excerpt, file_url, category, published, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                 title = EXCLUDED.title,
                 excerpt = EXCLUDED.excerpt,
                 file_url = EXCLUDED.file_url,
                 category = EXCLUDED.category,
                 published = EXCLUDED.published,
                 display_order = EXCLUDED.display_order,
                 updated_at = now()
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.file_url)
        .bind(&input.category)
        .bind(input.published)
        .bind(input.display_order)
        .fetch_one(pool)
        .await?;
        Ok(download)
    }

    pub async fn delete(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM downloads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
