// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `KeyValueStore` with failure injection.
//!
//! Drop-in replacement for the SQLite store in tests, plus switches to make
//! reads or writes fail so storage-error paths can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use uniport_core::{KeyValueStore, UniportError};

/// In-memory key-value store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail with a storage error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set`/`remove` fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Whether a key currently exists (bypasses failure injection).
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.lock().await.contains_key(key)
    }

    /// Overwrite a single raw value (bypasses failure injection). Used to
    /// seed corrupted or partial state.
    pub async fn insert_raw(&self, key: &str, value: serde_json::Value) {
        self.entries.lock().await.insert(key.to_string(), value);
    }

    fn storage_error(what: &str) -> UniportError {
        UniportError::Storage {
            source: Box::new(std::io::Error::other(format!("injected {what} failure"))),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(
        &self,
        keys: &[&str],
    ) -> Result<HashMap<String, serde_json::Value>, UniportError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::storage_error("read"));
        }
        let entries = self.entries.lock().await;
        let mut found = HashMap::new();
        for key in keys {
            if let Some(value) = entries.get(*key) {
                found.insert(key.to_string(), value.clone());
            }
        }
        Ok(found)
    }

    async fn set(
        &self,
        new_entries: HashMap<String, serde_json::Value>,
    ) -> Result<(), UniportError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::storage_error("write"));
        }
        let mut entries = self.entries.lock().await;
        entries.extend(new_entries);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), UniportError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::storage_error("write"));
        }
        let mut entries = self.entries.lock().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
