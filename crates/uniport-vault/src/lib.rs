// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-based encrypted credential vault for the Uniport login agent.
//!
//! Converts the master secret into a symmetric key via PBKDF2-HMAC-SHA256
//! (100,000 iterations), encrypts the account identifier and passphrase
//! independently with AES-256-GCM, and persists the resulting records
//! through the key-value store contract.
//!
//! Note on the threat model: with the default embedded master secret the
//! vault defends against casual local inspection only. See [`master`].

pub mod crypto;
pub mod kdf;
pub mod master;
pub mod record;
pub mod vault;

pub use master::{master_secret, VAULT_KEY_ENV_VAR};
pub use record::{decrypt, encrypt, EncryptedRecord};
pub use vault::{
    mask_secret, CredentialVault, KEY_IDENTIFIER, KEY_PASSPHRASE, KEY_PRESENT, KEY_UPDATED_AT,
};
