// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Uniport login agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Uniport configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UniportConfig {
    /// Agent behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Portal page settings: login URL, submit behavior, selector overrides.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Captcha recognition settings.
    #[serde(default)]
    pub captcha: CaptchaConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Agent behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Portal page configuration.
///
/// The selector lists are ordered candidate chains; the agent tries each
/// selector in sequence and the first match wins. The defaults cover the
/// markup conventions the target portal has used across redesigns.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// The login page URL (informational; the page driver owns navigation).
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Click the submit button after filling the form.
    #[serde(default = "default_auto_submit")]
    pub auto_submit: bool,

    /// Candidate selectors for the account identifier field.
    #[serde(default = "default_identifier_selectors")]
    pub identifier_selectors: Vec<String>,

    /// Candidate selectors for the passphrase field.
    #[serde(default = "default_passphrase_selectors")]
    pub passphrase_selectors: Vec<String>,

    /// Candidate selectors for the captcha image element.
    #[serde(default = "default_captcha_image_selectors")]
    pub captcha_image_selectors: Vec<String>,

    /// Candidate selectors for the captcha text input.
    #[serde(default = "default_captcha_input_selectors")]
    pub captcha_input_selectors: Vec<String>,

    /// Candidate selectors for the submit button.
    #[serde(default = "default_submit_selectors")]
    pub submit_selectors: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            auto_submit: default_auto_submit(),
            identifier_selectors: default_identifier_selectors(),
            passphrase_selectors: default_passphrase_selectors(),
            captcha_image_selectors: default_captcha_image_selectors(),
            captcha_input_selectors: default_captcha_input_selectors(),
            submit_selectors: default_submit_selectors(),
        }
    }
}

fn default_login_url() -> String {
    "https://portal.example.edu/login".to_string()
}

fn default_auto_submit() -> bool {
    true
}

fn default_identifier_selectors() -> Vec<String> {
    [
        "#username",
        "input[name='username']",
        "input[name='j_username']",
        "input[type='text'][name*='user']",
    ]
    .map(String::from)
    .to_vec()
}

fn default_passphrase_selectors() -> Vec<String> {
    [
        "#password",
        "input[name='password']",
        "input[name='j_password']",
        "input[type='password']",
    ]
    .map(String::from)
    .to_vec()
}

fn default_captcha_image_selectors() -> Vec<String> {
    [
        "#captchaImg",
        "img[id*='captcha']",
        "img[src*='captcha']",
        "img[src*='validateCode']",
    ]
    .map(String::from)
    .to_vec()
}

fn default_captcha_input_selectors() -> Vec<String> {
    [
        "#captcha",
        "input[name='captcha']",
        "input[id*='captcha']",
        "input[name*='validateCode']",
    ]
    .map(String::from)
    .to_vec()
}

fn default_submit_selectors() -> Vec<String> {
    [
        "#loginBtn",
        "button[type='submit']",
        "input[type='submit']",
        "button[name='login']",
    ]
    .map(String::from)
    .to_vec()
}

/// Captcha recognition configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaptchaConfig {
    /// Maximum recognition attempts; each attempt acquires a fresh image.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Minimum OCR confidence in [0, 1]; lower results are discarded.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_confidence: default_min_confidence(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_min_confidence() -> f32 {
    0.5
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite database path for the key-value store.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "uniport.db".to_string()
}
