// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent key-value store contract.
//!
//! A durable mapping from string keys to arbitrary JSON values with
//! asynchronous get/set/remove. No transactions, no schema enforcement;
//! callers own any multi-key consistency they need.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::UniportError;

/// Asynchronous key-value persistence.
///
/// `get` returns only the keys that exist; absent keys simply do not appear
/// in the result map. `remove` of a missing key is a no-op.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the requested keys. Missing keys are omitted from the result.
    async fn get(
        &self,
        keys: &[&str],
    ) -> Result<HashMap<String, serde_json::Value>, UniportError>;

    /// Write all entries. Existing values are replaced.
    async fn set(
        &self,
        entries: HashMap<String, serde_json::Value>,
    ) -> Result<(), UniportError>;

    /// Delete the given keys. Missing keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<(), UniportError>;
}
