// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle: store, retrieve, and clear the portal credential pair.
//!
//! The vault holds exactly one credential set: the account identifier and
//! the passphrase, encrypted independently (each under its own fresh
//! salt/nonce) and persisted through the key-value store together with a
//! presence flag and a last-modified timestamp.
//!
//! Retrieval is all-or-nothing: an absent, partial, or integrity-failing set
//! reads as "no credentials configured". A half-restored pair is unusable
//! and indistinguishable from corruption, so no partial recovery is
//! attempted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use uniport_core::{KeyValueStore, StoredCredentials, UniportError};

use crate::master;
use crate::record::{self, EncryptedRecord};

/// Key for the encrypted account identifier record.
pub const KEY_IDENTIFIER: &str = "cred.identifier";
/// Key for the encrypted passphrase record.
pub const KEY_PASSPHRASE: &str = "cred.passphrase";
/// Key for the boolean presence flag. True iff both records exist.
pub const KEY_PRESENT: &str = "cred.present";
/// Key for the RFC 3339 last-modified timestamp.
pub const KEY_UPDATED_AT: &str = "cred.updated_at";

/// The credential vault.
///
/// Debug output intentionally omits the master secret.
pub struct CredentialVault {
    store: Arc<dyn KeyValueStore>,
    master: SecretString,
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("master", &"[REDACTED]")
            .finish()
    }
}

impl CredentialVault {
    /// Create a vault over a store with an explicit master secret.
    pub fn new(store: Arc<dyn KeyValueStore>, master: SecretString) -> Self {
        Self { store, master }
    }

    /// Create a vault with the resolved master secret (env override or the
    /// embedded default -- see [`crate::master`]).
    pub fn with_default_master(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, master::master_secret())
    }

    /// Encrypt and persist both credential fields as one logical unit.
    ///
    /// Each field gets its own fresh salt and nonce; the two records never
    /// share key material. Old records are fully superseded.
    pub async fn store(&self, identifier: &str, passphrase: &str) -> Result<(), UniportError> {
        let identifier_record = record::encrypt(identifier, &self.master)?;
        let passphrase_record = record::encrypt(passphrase, &self.master)?;

        let mut entries = HashMap::new();
        entries.insert(KEY_IDENTIFIER.to_string(), identifier_record.to_value()?);
        entries.insert(KEY_PASSPHRASE.to_string(), passphrase_record.to_value()?);
        entries.insert(KEY_PRESENT.to_string(), serde_json::Value::Bool(true));
        entries.insert(
            KEY_UPDATED_AT.to_string(),
            serde_json::Value::String(Utc::now().to_rfc3339()),
        );

        self.store.set(entries).await?;
        info!("credentials stored");
        Ok(())
    }

    /// Read and decrypt the credential set.
    ///
    /// Returns both fields `None` when the set is absent, partial, or fails
    /// its integrity check -- the expected state before first configuration,
    /// never an error. Storage failures are errors.
    pub async fn retrieve(&self) -> Result<StoredCredentials, UniportError> {
        let found = self
            .store
            .get(&[KEY_IDENTIFIER, KEY_PASSPHRASE, KEY_PRESENT])
            .await?;

        let present = found
            .get(KEY_PRESENT)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !present {
            debug!("presence flag unset; no credentials configured");
            return Ok(StoredCredentials::default());
        }

        let (Some(identifier_value), Some(passphrase_value)) =
            (found.get(KEY_IDENTIFIER), found.get(KEY_PASSPHRASE))
        else {
            warn!("credential set is partial; treating as not configured");
            return Ok(StoredCredentials::default());
        };

        let Some(identifier) = self.open_field(identifier_value, "identifier")? else {
            return Ok(StoredCredentials::default());
        };
        let Some(passphrase) = self.open_field(passphrase_value, "passphrase")? else {
            return Ok(StoredCredentials::default());
        };

        Ok(StoredCredentials {
            identifier: Some(SecretString::from(identifier)),
            passphrase: Some(SecretString::from(passphrase)),
        })
    }

    /// Remove the credential set. Idempotent: clearing an empty vault
    /// succeeds.
    pub async fn clear(&self) -> Result<(), UniportError> {
        self.store
            .remove(&[KEY_IDENTIFIER, KEY_PASSPHRASE, KEY_PRESENT, KEY_UPDATED_AT])
            .await?;
        info!("credentials cleared");
        Ok(())
    }

    /// Whether a complete credential set is stored, without decrypting it.
    pub async fn is_configured(&self) -> Result<bool, UniportError> {
        let found = self
            .store
            .get(&[KEY_IDENTIFIER, KEY_PASSPHRASE, KEY_PRESENT])
            .await?;
        let present = found
            .get(KEY_PRESENT)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(present && found.contains_key(KEY_IDENTIFIER) && found.contains_key(KEY_PASSPHRASE))
    }

    /// When the credential set was last written, if known.
    pub async fn updated_at(&self) -> Result<Option<DateTime<Utc>>, UniportError> {
        let found = self.store.get(&[KEY_UPDATED_AT]).await?;
        let Some(text) = found.get(KEY_UPDATED_AT).and_then(|v| v.as_str()) else {
            return Ok(None);
        };
        match DateTime::parse_from_rfc3339(text) {
            Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
            Err(_) => {
                warn!("stored timestamp is malformed; ignoring it");
                Ok(None)
            }
        }
    }

    /// Decode and decrypt one field. Integrity failures (wrong master secret,
    /// corruption, malformed record) collapse to `Ok(None)` so the caller
    /// reads the whole set as not configured; other errors propagate.
    fn open_field(
        &self,
        value: &serde_json::Value,
        field: &str,
    ) -> Result<Option<String>, UniportError> {
        let encrypted = match EncryptedRecord::from_value(value) {
            Ok(record) => record,
            Err(UniportError::Integrity) => {
                warn!(field = %field, "stored record is malformed");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        match record::decrypt(&encrypted, &self.master) {
            Ok(plaintext) => Ok(Some(plaintext)),
            Err(UniportError::Integrity) => {
                warn!(field = %field, "record failed integrity check");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Mask a secret value for display: `"s202...3456"` format.
///
/// Shows up to 4 leading and 4 trailing characters with "..." in between.
/// Short values (< 10 chars) are fully masked as "****".
pub fn mask_secret(value: &str) -> String {
    if value.len() < 10 {
        return "****".to_string();
    }
    let prefix = &value[..4.min(value.len())];
    let suffix = &value[value.len().saturating_sub(4)..];
    format!("{prefix}...{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use uniport_test_utils::MemoryStore;

    fn vault_over(store: Arc<MemoryStore>) -> CredentialVault {
        CredentialVault::new(store, SecretString::from("test-master".to_string()))
    }

    #[tokio::test]
    async fn store_then_retrieve_returns_exact_pair() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        vault.store("alice", "p@ss1").await.unwrap();

        let creds = vault.retrieve().await.unwrap();
        assert_eq!(creds.identifier.unwrap().expose_secret(), "alice");
        assert_eq!(creds.passphrase.unwrap().expose_secret(), "p@ss1");
    }

    #[tokio::test]
    async fn retrieve_before_first_store_returns_no_credentials() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        let creds = vault.retrieve().await.unwrap();
        assert!(!creds.is_configured());
        assert!(creds.identifier.is_none());
        assert!(creds.passphrase.is_none());
    }

    #[tokio::test]
    async fn overwrite_fully_supersedes_previous_set() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        vault.store("alice", "p1").await.unwrap();
        vault.store("bob", "p2").await.unwrap();

        let creds = vault.retrieve().await.unwrap();
        assert_eq!(creds.identifier.unwrap().expose_secret(), "bob");
        assert_eq!(creds.passphrase.unwrap().expose_secret(), "p2");
    }

    #[tokio::test]
    async fn clear_on_empty_vault_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        vault.clear().await.unwrap();
        vault.clear().await.unwrap();

        let creds = vault.retrieve().await.unwrap();
        assert!(!creds.is_configured());
    }

    #[tokio::test]
    async fn clear_removes_every_vault_key() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store.clone());

        vault.store("alice", "p@ss1").await.unwrap();
        vault.clear().await.unwrap();

        for key in [KEY_IDENTIFIER, KEY_PASSPHRASE, KEY_PRESENT, KEY_UPDATED_AT] {
            assert!(!store.contains(key).await, "{key} should be gone");
        }
        assert!(!vault.retrieve().await.unwrap().is_configured());
    }

    #[tokio::test]
    async fn partial_record_reads_as_not_configured() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store.clone());

        vault.store("alice", "p@ss1").await.unwrap();
        // Simulate a write interrupted between the two field records.
        store.remove(&[KEY_PASSPHRASE]).await.unwrap();

        let creds = vault.retrieve().await.unwrap();
        assert!(creds.identifier.is_none(), "no partial decryption may leak");
        assert!(creds.passphrase.is_none());
    }

    #[tokio::test]
    async fn wrong_master_secret_reads_as_not_configured() {
        let store = Arc::new(MemoryStore::new());
        let writer = CredentialVault::new(
            store.clone(),
            SecretString::from("master-a".to_string()),
        );
        writer.store("alice", "p@ss1").await.unwrap();

        let reader = CredentialVault::new(store, SecretString::from("master-b".to_string()));
        let creds = reader.retrieve().await.unwrap();
        assert!(!creds.is_configured());
    }

    #[tokio::test]
    async fn corrupted_record_reads_as_not_configured() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store.clone());

        vault.store("alice", "p@ss1").await.unwrap();
        store
            .insert_raw(KEY_IDENTIFIER, serde_json::json!({"garbage": true}))
            .await;

        let creds = vault.retrieve().await.unwrap();
        assert!(!creds.is_configured());
    }

    #[tokio::test]
    async fn storage_write_failure_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes(true);
        let vault = vault_over(store);

        let result = vault.store("alice", "p@ss1").await;
        assert!(matches!(result, Err(UniportError::Storage { .. })));
    }

    #[tokio::test]
    async fn storage_read_failure_is_reported() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store.clone());
        vault.store("alice", "p@ss1").await.unwrap();

        store.fail_reads(true);
        let result = vault.retrieve().await;
        assert!(matches!(result, Err(UniportError::Storage { .. })));
    }

    #[tokio::test]
    async fn is_configured_tracks_store_and_clear() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        assert!(!vault.is_configured().await.unwrap());
        vault.store("alice", "p@ss1").await.unwrap();
        assert!(vault.is_configured().await.unwrap());
        vault.clear().await.unwrap();
        assert!(!vault.is_configured().await.unwrap());
    }

    #[tokio::test]
    async fn updated_at_is_set_by_store() {
        let store = Arc::new(MemoryStore::new());
        let vault = vault_over(store);

        assert!(vault.updated_at().await.unwrap().is_none());
        vault.store("alice", "p@ss1").await.unwrap();
        assert!(vault.updated_at().await.unwrap().is_some());
    }

    #[test]
    fn mask_secret_long_value() {
        assert_eq!(mask_secret("s2021123456789"), "s202...6789");
    }

    #[test]
    fn mask_secret_short_value() {
        assert_eq!(mask_secret("short"), "****");
    }

    #[test]
    fn mask_secret_exact_boundary() {
        assert_eq!(mask_secret("1234567890"), "1234...7890");
    }
}
