// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `uniport status` command implementation.
//!
//! Reports whether a credential set is configured (without decrypting it),
//! when it was last written, and the effective portal settings.

use serde::Serialize;

use uniport_config::UniportConfig;
use uniport_core::UniportError;

use crate::credentials::open_vault;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub configured: bool,
    pub updated_at: Option<String>,
    pub database_path: String,
    pub login_url: String,
    pub auto_submit: bool,
}

/// Run the `uniport status` command.
pub async fn run_status(config: &UniportConfig, json: bool) -> Result<(), UniportError> {
    let vault = open_vault(config).await?;
    let configured = vault.is_configured().await?;
    let updated_at = vault.updated_at().await?.map(|ts| ts.to_rfc3339());

    let response = StatusResponse {
        configured,
        updated_at,
        database_path: config.storage.database_path.clone(),
        login_url: config.portal.login_url.clone(),
        auto_submit: config.portal.auto_submit,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        println!(
            "credentials: {}",
            if response.configured { "configured" } else { "not configured" }
        );
        if let Some(ts) = &response.updated_at {
            println!("last update: {ts}");
        }
        println!("database:    {}", response.database_path);
        println!("portal:      {}", response.login_url);
        println!("auto submit: {}", response.auto_submit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn status_runs_against_a_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = UniportConfig::default();
        config.storage.database_path =
            dir.path().join("status.db").to_str().unwrap().to_string();

        run_status(&config, true).await.unwrap();
        run_status(&config, false).await.unwrap();
    }
}
