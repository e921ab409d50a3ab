//! Producer model - directory entries for the association's members.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A producer in the public directory
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Producer {
    pub id: String,

    pub name: String,
    pub community: String,
    pub municipality: String,
    /// What the producer farms, e.g. "ostras, mexilhões"
    pub products: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,

    // Map pin, filled by geocoding on upsert
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin upsert payload for a producer
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerInput {
    pub name: String,
    pub community: String,
    pub municipality: String,
    #[serde(default)]
    pub products: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Producer {
    pub async fn find_by_id(id: &str, pool: &PgPool) -> Result<Option<Self>> {
        let producer = sqlx::query_as::<_, Self>("SELECT * FROM producers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(producer)
    }

    /// Active producers for the public directory
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>> {
        let producers = sqlx::query_as::<_, Self>(
            "SELECT * FROM producers WHERE active = true ORDER BY name",
        )
        .fetch_all(pool)
        .await?;
        Ok(producers)
    }

    /// All producers for the admin console
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let producers = sqlx::query_as::<_, Self>("SELECT * FROM producers ORDER BY name")
            .fetch_all(pool)
            .await?;
        Ok(producers)
    }

    /// Insert-or-update by id. `coords` carries the geocoded map pin when the
    /// caller resolved one; absent coordinates keep any previously stored pin.
    pub async fn upsert(
        id: &str,
        input: ProducerInput,
        coords: Option<(f64, f64)>,
        pool: &PgPool,
    ) -> Result<Self> {
        let producer = sqlx::query_as::<_, Self>(
            "INSERT INTO producers
                 (id, name, community, municipality, products, phone, photo_url,
                  latitude, longitude, active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 community = EXCLUDED.community,
                 municipality = EXCLUDED.municipality,
                 products = EXCLUDED.products,
                 phone = EXCLUDED.phone,
                 photo_url = EXCLUDED.photo_url,
                 latitude = COALESCE(EXCLUDED.latitude, producers.latitude),
                 longitude = COALESCE(EXCLUDED.longitude, producers.longitude),
                 active = EXCLUDED.active,
                 updated_at = now()
             RETURNING *",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.community)
        .bind(&input.municipality)
        .bind(&input.products)
        .bind(&input.phone)
        .bind(&input.photo_url)
        .bind(coords.map(|c| c.0))
        .bind(coords.map(|c| c.1))
        .bind(input.active)
        .fetch_one(pool)
        .await?;
        Ok(producer)
    }

    pub async fn delete(id: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
