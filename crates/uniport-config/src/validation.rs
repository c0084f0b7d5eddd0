// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as confidence ranges and non-empty selector chains.

use crate::diagnostic::ConfigError;
use crate::model::UniportConfig;

const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &UniportConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !KNOWN_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                KNOWN_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.captcha.max_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "captcha.max_attempts must be at least 1, got {}",
                config.captcha.max_attempts
            ),
        });
    }

    if !(0.0..=1.0).contains(&config.captcha.min_confidence) {
        errors.push(ConfigError::Validation {
            message: format!(
                "captcha.min_confidence must be within [0.0, 1.0], got {}",
                config.captcha.min_confidence
            ),
        });
    }

    let chains = [
        ("portal.identifier_selectors", &config.portal.identifier_selectors),
        ("portal.passphrase_selectors", &config.portal.passphrase_selectors),
        (
            "portal.captcha_image_selectors",
            &config.portal.captcha_image_selectors,
        ),
        (
            "portal.captcha_input_selectors",
            &config.portal.captcha_input_selectors,
        ),
        ("portal.submit_selectors", &config.portal.submit_selectors),
    ];
    for (name, chain) in chains {
        if chain.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{name} must list at least one candidate selector"),
            });
        }
        if chain.iter().any(|s| s.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("{name} must not contain empty selectors"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = UniportConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = UniportConfig::default();
        config.agent.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = UniportConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn zero_attempts_fails_validation() {
        let mut config = UniportConfig::default();
        config.captcha.max_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_attempts"))
        ));
    }

    #[test]
    fn out_of_range_confidence_fails_validation() {
        let mut config = UniportConfig::default();
        config.captcha.min_confidence = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("min_confidence"))
        ));
    }

    #[test]
    fn empty_selector_chain_fails_validation() {
        let mut config = UniportConfig::default();
        config.portal.submit_selectors = vec![];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("submit_selectors"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = UniportConfig::default();
        config.captcha.max_attempts = 0;
        config.captcha.min_confidence = -0.1;
        config.storage.database_path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
