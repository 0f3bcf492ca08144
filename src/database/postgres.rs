//! Postgres-backed record store
//!
//! Rows live in per-entity tables with a jsonb `columns` document, so the
//! upsert layer's column-level merge works without schema migrations when
//! the entity shapes grow. Filters use jsonb containment.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::store::{tables, RecordStore, StoredRow};

#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the engine's tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        for table in [tables::PERSONS, tables::PROPERTIES, tables::DEALS] {
            let sql = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id UUID PRIMARY KEY,
                    columns JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            );
            sqlx::query(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to create table {table}"))?;
        }
        info!("persistence schema ready");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_one(&self, table: &str, filter: &JsonValue) -> Result<Option<StoredRow>> {
        let sql = format!(
            "SELECT id, columns, created_at, updated_at FROM {table} WHERE columns @> $1 LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(filter)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to query {table}"))?;

        Ok(row.map(|r| StoredRow {
            id: r.get::<Uuid, _>("id"),
            columns: r.get::<JsonValue, _>("columns"),
            created_at: r.get::<DateTime<Utc>, _>("created_at"),
            updated_at: r.get::<DateTime<Utc>, _>("updated_at"),
        }))
    }

    async fn insert(&self, table: &str, columns: JsonValue) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO {table} (id, columns, created_at, updated_at) VALUES ($1, $2, NOW(), NOW())"
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&columns)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to insert into {table}"))?;
        Ok(id)
    }

    async fn update(&self, table: &str, id: Uuid, partial: JsonValue) -> Result<()> {
        let sql = format!(
            "UPDATE {table} SET columns = columns || $1, updated_at = NOW() WHERE id = $2"
        );
        sqlx::query(&sql)
            .bind(&partial)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update {table}"))?;
        Ok(())
    }
}
