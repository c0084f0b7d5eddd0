// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Uniport login agent.
//!
//! Provides a WAL-mode SQLite implementation of the `KeyValueStore`
//! contract with a single-writer concurrency model via `tokio-rusqlite`.

pub mod database;
pub mod kv;

pub use database::KvDatabase;
pub use kv::SqliteStore;
