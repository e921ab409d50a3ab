//! Event model - calendar entries for the association's agenda.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// An agenda event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: String,

    pub title: String,
    pub excerpt: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: Option<String>,

    pub published: bool,
    pub display_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin upsert payload for an event
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub display_order: i64,
}

impl Event {
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let event = sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(event)
    }

    pub async fn list_published(pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Self>(
            "SELECT * FROM events WHERE published = true
             ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let events = sqlx::query_as::<_, Self>(
            "SELECT * FROM events ORDER BY display_order, created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(events)
    }

    pub async fn upsert(id: &str, input: EventInput, pool: &PgPool) -> Result<Self> {
        let event = sqlx::query_as::<_, Self>(
            "INSERT INTO events (id, title, excerpt, starts_at, location, published, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (id) DO UPDATE SET
                 title = EXCLUDED.title,
                 excerpt = EXCLUDED.excerpt,
                 starts_at = EXCLUDED.starts_at,
                 location = EXCLUDED.location,
                 published = EXCLUDED.published,
                 display_order = EXCLUDED.display_order,
                 updated_at = now()
             RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.excerpt)
        .bind(input.starts_at)
        .bind(&input.location)
        .bind(input.published)
        .bind(input.display_order)
        .fetch_one(pool)
        .await?;
        Ok(event)
    }

    pub async fn delete(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
