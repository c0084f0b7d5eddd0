// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Uniport login agent.

use thiserror::Error;

/// The primary error type used across all Uniport crates.
#[derive(Debug, Error)]
pub enum UniportError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Key-value store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Authenticated decryption failed: wrong master secret, corrupted record,
    /// or a nonce/salt that does not belong to the ciphertext. The caller never
    /// receives partial plaintext alongside this error.
    #[error("integrity check failed: wrong master secret or corrupted record")]
    Integrity,

    /// Vault errors other than integrity failures (key derivation, record
    /// encoding, randomness).
    #[error("vault error: {0}")]
    Vault(String),

    /// Page driver errors (element access failure, image fetch failure).
    #[error("page error: {message}")]
    Page {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// OCR engine errors (recognition failure, malformed image input).
    #[error("ocr error: {message}")]
    Ocr {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
