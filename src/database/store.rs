//! Storage primitives consumed by the upsert layer
//!
//! Exact schema and table naming are the storage layer's concern; the
//! engine only requires these three operations. Rows carry their columns
//! as a JSON object so the column-level fill-gap merge can run without
//! knowing the schema.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One stored row with its column values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRow {
    pub id: Uuid,
    /// Column name → value.
    pub columns: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three primitives the engine consumes from the external store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the first row whose columns match every key/value in `filter`.
    async fn find_one(&self, table: &str, filter: &JsonValue) -> Result<Option<StoredRow>>;

    /// Insert a new row, returning its id.
    async fn insert(&self, table: &str, columns: JsonValue) -> Result<Uuid>;

    /// Overwrite the given columns of an existing row and touch its update
    /// timestamp. Columns not named in `partial` are left untouched.
    async fn update(&self, table: &str, id: Uuid, partial: JsonValue) -> Result<()>;
}

/// Table names used by the upsert layer.
pub mod tables {
    pub const PERSONS: &str = "minuta_persons";
    pub const PROPERTIES: &str = "minuta_properties";
    pub const DEALS: &str = "minuta_deals";
}
