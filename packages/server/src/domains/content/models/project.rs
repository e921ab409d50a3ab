//! Project model - association projects presented on the public site.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,

    pub title: String,
    pub excerpt: String,
    pub summary_url: Option<String>,

    pub published: bool,
    pub display_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub summary_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub display_order: i64,
}

impl Project {
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let project = sqlx::query_as::<_, Self>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>> {
        let projects = sqlx::query_as::<_, Self>(
            "SELECT * FROM projects WHERE published = true
             ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(projects)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let projects = sqlx::query_as::<_, Self>(
            "SELECT * FROM projects ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(projects)
    }

    pub async fn upsert(id: &str, input: ProjectInput, pool: &PgPool) -> Result<Self> {
        let project = sqlx::query_as::<_, Self>(
            "INSERT INTO projects (id, title, excerpt, summary_url, published, display_order)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE SET
                 title = EXCLUDED.title,
                 excerpt = EXCLUDED.excerpt,
                 summary_url = EXCLUDED.summary_url,
                 published = EXCLUDED.published,
                 display_order = EXCLUDED.display_order,
                 updated_at = now()
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(&input.summary_url)
        .bind(input.published)
        .bind(input.display_order)
        .fetch_one(pool)
        .await?;
        Ok(project)
    }

    pub async fn delete(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
