// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `uniport credentials` subcommands: set, show, clear.
//!
//! The passphrase is read without echo via `rpassword`. Nothing here ever
//! prints a plaintext secret; `show` displays masked previews only.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use secrecy::ExposeSecret;

use uniport_config::UniportConfig;
use uniport_core::UniportError;
use uniport_store::{KvDatabase, SqliteStore};
use uniport_vault::{mask_secret, CredentialVault};

/// Open the vault over the configured SQLite store.
pub async fn open_vault(config: &UniportConfig) -> Result<CredentialVault, UniportError> {
    let db = KvDatabase::open(&config.storage.database_path).await?;
    let store = Arc::new(SqliteStore::new(db.connection().clone()));
    Ok(CredentialVault::with_default_master(store))
}

/// Run `uniport credentials set`: prompt for a pair and store it encrypted.
pub async fn run_set(config: &UniportConfig) -> Result<(), UniportError> {
    if !std::io::stdin().is_terminal() {
        return Err(UniportError::Vault(
            "credentials set requires an interactive terminal".to_string(),
        ));
    }

    eprint!("Account identifier: ");
    let _ = std::io::stderr().flush();
    let mut identifier = String::new();
    std::io::stdin()
        .read_line(&mut identifier)
        .map_err(|e| UniportError::Vault(format!("failed to read identifier: {e}")))?;
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(UniportError::Vault("identifier must not be empty".to_string()));
    }

    eprint!("Portal passphrase: ");
    let pass1 = rpassword::read_password()
        .map_err(|e| UniportError::Vault(format!("failed to read passphrase: {e}")))?;
    eprint!("Confirm portal passphrase: ");
    let pass2 = rpassword::read_password()
        .map_err(|e| UniportError::Vault(format!("failed to read passphrase: {e}")))?;

    if pass1 != pass2 {
        return Err(UniportError::Vault("passphrases do not match".to_string()));
    }
    if pass1.is_empty() {
        return Err(UniportError::Vault("empty passphrase not allowed".to_string()));
    }

    let vault = open_vault(config).await?;
    vault.store(identifier, &pass1).await?;
    println!("Credentials stored.");
    Ok(())
}

/// Run `uniport credentials show`: masked previews of the stored pair.
pub async fn run_show(config: &UniportConfig) -> Result<(), UniportError> {
    let vault = open_vault(config).await?;
    let credentials = vault.retrieve().await?;

    match (credentials.identifier, credentials.passphrase) {
        (Some(identifier), Some(passphrase)) => {
            println!("identifier: {}", mask_secret(identifier.expose_secret()));
            println!("passphrase: {}", mask_secret(passphrase.expose_secret()));
        }
        _ => println!("No credentials configured."),
    }
    Ok(())
}

/// Run `uniport credentials clear`. Succeeds even when nothing is stored.
pub async fn run_clear(config: &UniportConfig) -> Result<(), UniportError> {
    let vault = open_vault(config).await?;
    vault.clear().await?;
    println!("Credentials cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_db(path: &str) -> UniportConfig {
        let mut config = UniportConfig::default();
        config.storage.database_path = path.to_string();
        config
    }

    #[tokio::test]
    async fn open_vault_creates_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.db");
        let config = config_with_db(path.to_str().unwrap());

        let vault = open_vault(&config).await.unwrap();
        assert!(!vault.is_configured().await.unwrap());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn clear_on_fresh_database_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cli.db");
        let config = config_with_db(path.to_str().unwrap());

        run_clear(&config).await.unwrap();
    }
}
