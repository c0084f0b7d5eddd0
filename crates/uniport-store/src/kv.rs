// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `KeyValueStore` implementation over SQLite.
//!
//! Values are stored as JSON text. Multi-key `set` and `remove` run inside a
//! single transaction so a crash never leaves half of one call applied; the
//! contract itself still promises no cross-call transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;
use uniport_core::{KeyValueStore, UniportError};

use crate::database::map_tr_err;

/// SQLite-backed key-value store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
    /// Wrap an open connection (see [`crate::database::KvDatabase`]).
    pub fn new(conn: tokio_rusqlite::Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(
        &self,
        keys: &[&str],
    ) -> Result<HashMap<String, serde_json::Value>, UniportError> {
        let owned: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let rows = self
            .conn
            .call(move |conn| -> Result<Vec<(String, String)>, rusqlite::Error> {
                let mut stmt = conn.prepare("SELECT value FROM kv_entries WHERE key = ?1")?;
                let mut rows = Vec::new();
                for key in &owned {
                    match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
                        Ok(value) => rows.push((key.clone(), value)),
                        Err(rusqlite::Error::QueryReturnedNoRows) => {}
                        Err(e) => return Err(e),
                    }
                }
                Ok(rows)
            })
            .await
            .map_err(map_tr_err)?;

        let mut found = HashMap::with_capacity(rows.len());
        for (key, text) in rows {
            let value = serde_json::from_str(&text)
                .map_err(|e| UniportError::Storage { source: Box::new(e) })?;
            found.insert(key, value);
        }
        Ok(found)
    }

    async fn set(
        &self,
        entries: HashMap<String, serde_json::Value>,
    ) -> Result<(), UniportError> {
        let mut rows = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let text = serde_json::to_string(&value)
                .map_err(|e| UniportError::Storage { source: Box::new(e) })?;
            rows.push((key, text));
        }

        let count = rows.len();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                for (key, text) in &rows {
                    tx.execute(
                        "INSERT OR REPLACE INTO kv_entries (key, value) VALUES (?1, ?2)",
                        params![key, text],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(count, "kv entries written");
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), UniportError> {
        let owned: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let count = owned.len();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                for key in &owned {
                    tx.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(count, "kv entries removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::KvDatabase;
    use serde_json::json;

    async fn open_store() -> SqliteStore {
        let db = KvDatabase::open_in_memory().await.unwrap();
        SqliteStore::new(db.connection().clone())
    }

    #[tokio::test]
    async fn set_then_get_round_trips_values() {
        let store = open_store().await;

        let mut entries = HashMap::new();
        entries.insert("flag".to_string(), json!(true));
        entries.insert("blob".to_string(), json!({"nonce": "AAEC", "n": 12}));
        store.set(entries).await.unwrap();

        let found = store.get(&["flag", "blob"]).await.unwrap();
        assert_eq!(found.get("flag"), Some(&json!(true)));
        assert_eq!(found.get("blob"), Some(&json!({"nonce": "AAEC", "n": 12})));
    }

    #[tokio::test]
    async fn missing_keys_are_omitted_from_get() {
        let store = open_store().await;

        let mut entries = HashMap::new();
        entries.insert("present".to_string(), json!(1));
        store.set(entries).await.unwrap();

        let found = store.get(&["present", "absent"]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(!found.contains_key("absent"));
    }

    #[tokio::test]
    async fn set_replaces_existing_values() {
        let store = open_store().await;

        let mut first = HashMap::new();
        first.insert("key".to_string(), json!("old"));
        store.set(first).await.unwrap();

        let mut second = HashMap::new();
        second.insert("key".to_string(), json!("new"));
        store.set(second).await.unwrap();

        let found = store.get(&["key"]).await.unwrap();
        assert_eq!(found.get("key"), Some(&json!("new")));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = open_store().await;

        let mut entries = HashMap::new();
        entries.insert("key".to_string(), json!("value"));
        store.set(entries).await.unwrap();

        store.remove(&["key", "never-existed"]).await.unwrap();
        store.remove(&["key"]).await.unwrap();

        let found = store.get(&["key"]).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");
        let path_str = path.to_str().unwrap();

        {
            let db = KvDatabase::open(path_str).await.unwrap();
            let store = SqliteStore::new(db.connection().clone());
            let mut entries = HashMap::new();
            entries.insert("durable".to_string(), json!("yes"));
            store.set(entries).await.unwrap();
        }

        let db = KvDatabase::open(path_str).await.unwrap();
        let store = SqliteStore::new(db.connection().clone());
        let found = store.get(&["durable"]).await.unwrap();
        assert_eq!(found.get("durable"), Some(&json!("yes")));
    }
}
