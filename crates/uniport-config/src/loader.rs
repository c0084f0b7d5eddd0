// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./uniport.toml` > `~/.config/uniport/uniport.toml`
//! > `/etc/uniport/uniport.toml` with environment variable overrides via the
//! `UNIPORT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::UniportConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/uniport/uniport.toml` (system-wide)
/// 3. `~/.config/uniport/uniport.toml` (user XDG config)
/// 4. `./uniport.toml` (local directory)
/// 5. `UNIPORT_*` environment variables
pub fn load_config() -> Result<UniportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UniportConfig::default()))
        .merge(Toml::file("/etc/uniport/uniport.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("uniport/uniport.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("uniport.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<UniportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UniportConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<UniportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UniportConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `UNIPORT_CAPTCHA_MAX_ATTEMPTS` must map
/// to `captcha.max_attempts`, not `captcha.max.attempts`.
fn env_provider() -> Env {
    Env::prefixed("UNIPORT_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("portal_", "portal.", 1)
            .replacen("captcha_", "captcha.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
