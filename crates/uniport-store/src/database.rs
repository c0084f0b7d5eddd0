// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and schema creation.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use tracing::debug;
use uniport_core::UniportError;

/// An open key-value database.
///
/// Owns the single `tokio_rusqlite::Connection`; clones of the connection
/// share the same background thread.
pub struct KvDatabase {
    conn: tokio_rusqlite::Connection,
}

impl KvDatabase {
    /// Open (or create) the database at `path`, enable WAL mode, and create
    /// the key-value schema if needed.
    pub async fn open(path: &str) -> Result<Self, UniportError> {
        let conn = tokio_rusqlite::Connection::open(path.to_string())
            .await
            .map_err(map_tr_err)?;
        let db = Self::initialize(conn).await?;
        debug!(path = %path, "key-value database opened");
        Ok(db)
    }

    /// Open an in-memory database (tests and ephemeral runs).
    pub async fn open_in_memory() -> Result<Self, UniportError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(map_tr_err)?;
        Self::initialize(conn).await
    }

    async fn initialize(conn: tokio_rusqlite::Connection) -> Result<Self, UniportError> {
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            // journal_mode returns the resulting mode as a row.
            let _mode: String =
                conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_entries (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                )",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        Ok(Self { conn })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Convert tokio-rusqlite / rusqlite errors to `UniportError::Storage`.
pub(crate) fn map_tr_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> UniportError {
    UniportError::Storage { source: Box::new(e) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_creates_schema() {
        let db = KvDatabase::open_in_memory().await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn open_is_idempotent_for_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");
        let path_str = path.to_str().unwrap();

        let first = KvDatabase::open(path_str).await.unwrap();
        drop(first);
        // Reopening the same file must not fail on the existing schema.
        KvDatabase::open(path_str).await.unwrap();
    }
}
