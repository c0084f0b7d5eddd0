// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-contained encrypted records: ciphertext + nonce + salt.
//!
//! A record carries everything needed to decrypt it except the master
//! secret. Records are never mutated in place; re-encryption always produces
//! a brand-new record with a fresh salt and nonce, even for identical
//! plaintext.
//!
//! Persisted shape: a JSON object with base64-encoded byte fields. This is
//! an internal format, not an interchange format; the only requirement is
//! that byte values round-trip exactly.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use uniport_core::UniportError;

use crate::crypto::{self, NONCE_LEN};
use crate::kdf::{self, SALT_LEN};

/// One encrypted secret with the randomness used to produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// AES-256-GCM ciphertext including the 16-byte authentication tag.
    #[serde(with = "b64")]
    pub ciphertext: Vec<u8>,
    /// The 12-byte nonce drawn for this record.
    #[serde(with = "b64")]
    pub nonce: Vec<u8>,
    /// The 16-byte KDF salt drawn for this record.
    #[serde(with = "b64")]
    pub salt: Vec<u8>,
}

impl EncryptedRecord {
    /// Serialize for the key-value store.
    pub fn to_value(&self) -> Result<serde_json::Value, UniportError> {
        serde_json::to_value(self)
            .map_err(|e| UniportError::Vault(format!("failed to encode record: {e}")))
    }

    /// Deserialize from a stored value.
    ///
    /// A value that does not decode as a record is indistinguishable from
    /// corruption and is reported as an integrity failure.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, UniportError> {
        serde_json::from_value(value.clone()).map_err(|_| UniportError::Integrity)
    }

    fn nonce_bytes(&self) -> Result<[u8; NONCE_LEN], UniportError> {
        self.nonce.as_slice().try_into().map_err(|_| UniportError::Integrity)
    }

    fn salt_bytes(&self) -> Result<[u8; SALT_LEN], UniportError> {
        self.salt.as_slice().try_into().map_err(|_| UniportError::Integrity)
    }
}

/// Encrypt a plaintext secret under the given password.
///
/// Draws a fresh salt and nonce from the system CSPRNG on every call, so two
/// encryptions of the same plaintext never share key material.
pub fn encrypt(plaintext: &str, password: &SecretString) -> Result<EncryptedRecord, UniportError> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(password.expose_secret().as_bytes(), &salt)?;
    let (ciphertext, nonce) = crypto::seal(&key, plaintext.as_bytes())?;

    Ok(EncryptedRecord {
        ciphertext,
        nonce: nonce.to_vec(),
        salt: salt.to_vec(),
    })
}

/// Decrypt a record under the given password.
///
/// Fails with [`UniportError::Integrity`] when the password is wrong or any
/// part of the record was altered; no partial plaintext is returned.
pub fn decrypt(record: &EncryptedRecord, password: &SecretString) -> Result<String, UniportError> {
    let salt = record.salt_bytes()?;
    let nonce = record.nonce_bytes()?;
    let key = kdf::derive_key(password.expose_secret().as_bytes(), &salt)?;
    let plaintext = crypto::open(&key, &nonce, &record.ciphertext)?;

    String::from_utf8(plaintext).map_err(|_| UniportError::Integrity)
}

mod b64 {
    //! Base64 (standard alphabet) encoding for byte fields in stored JSON.

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
