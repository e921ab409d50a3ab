use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_api_key: String,
    pub port: u16,
    pub push_server_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Resolved once at startup and injected into the handlers; a missing
    /// required variable is fatal before the server binds.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            admin_api_key: env::var("ADMIN_API_KEY")
                .context("ADMIN_API_KEY must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            push_server_key: env::var("PUSH_SERVER_KEY").ok(),
        })
    }
}
