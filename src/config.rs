//! Environment-driven settings
//!
//! Loads `.env` via dotenvy and exposes the handful of knobs the engine
//! needs. The engine itself has no configuration dimensions — this is the
//! glue for the persistence layer and the CLI.

use anyhow::{Context, Result};

/// Runtime settings resolved from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Postgres connection string for the persistence layer.
    pub database_url: String,
}

impl Settings {
    /// Resolve settings from the environment, loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set to use the persistence layer")?;

        Ok(Self { database_url })
    }
}
