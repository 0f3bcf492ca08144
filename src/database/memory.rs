//! In-memory record store
//!
//! Backs tests and CLI dry-runs with the same contract as the Postgres
//! store. Matching follows the store's filter semantics: every filter key
//! must equal the row's column value, null filter values match null or
//! absent columns.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::store::{RecordStore, StoredRow};

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: Mutex<HashMap<String, Vec<StoredRow>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in a table. Test helper.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Snapshot the rows of a table. Test helper.
    pub fn rows(&self, table: &str) -> Vec<StoredRow> {
        self.tables
            .lock()
            .expect("store mutex poisoned")
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn matches(row: &StoredRow, filter: &JsonValue) -> bool {
        let Some(filter_map) = filter.as_object() else {
            return false;
        };
        filter_map.iter().all(|(key, expected)| {
            let actual = row.columns.get(key).unwrap_or(&JsonValue::Null);
            actual == expected
        })
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_one(&self, table: &str, filter: &JsonValue) -> Result<Option<StoredRow>> {
        let tables = self.tables.lock().expect("store mutex poisoned");
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|row| Self::matches(row, filter)))
            .cloned())
    }

    async fn insert(&self, table: &str, columns: JsonValue) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let row = StoredRow {
            id,
            columns,
            created_at: now,
            updated_at: now,
        };
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        tables.entry(table.to_string()).or_default().push(row);
        Ok(id)
    }

    async fn update(&self, table: &str, id: Uuid, partial: JsonValue) -> Result<()> {
        let mut tables = self.tables.lock().expect("store mutex poisoned");
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|row| row.id == id))
            .ok_or_else(|| anyhow::anyhow!("row {id} not found in {table}"))?;

        if let (Some(columns), Some(partial_map)) = (row.columns.as_object_mut(), partial.as_object())
        {
            for (key, value) in partial_map {
                columns.insert(key.clone(), value.clone());
            }
        }
        row.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_find_one_matches_all_filter_keys() {
        let store = MemoryRecordStore::new();
        store
            .insert("t", json!({ "transaction_id": "tx1", "identity_key": "111" }))
            .await
            .unwrap();
        store
            .insert("t", json!({ "transaction_id": "tx1", "identity_key": "222" }))
            .await
            .unwrap();

        let row = store
            .find_one("t", &json!({ "transaction_id": "tx1", "identity_key": "222" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.columns["identity_key"], "222");

        let none = store
            .find_one("t", &json!({ "transaction_id": "tx2" }))
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_update_overwrites_named_columns_only() {
        let store = MemoryRecordStore::new();
        let id = store
            .insert("t", json!({ "a": 1, "b": 2 }))
            .await
            .unwrap();
        store.update("t", id, json!({ "b": 3 })).await.unwrap();

        let row = store.rows("t").pop().unwrap();
        assert_eq!(row.columns["a"], 1);
        assert_eq!(row.columns["b"], 3);
        assert!(row.updated_at >= row.created_at);
    }
}
