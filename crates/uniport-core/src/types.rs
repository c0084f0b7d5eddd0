// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Uniport crates.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque handle to an element located on the portal page.
///
/// The inner value is meaningful only to the `PageDriver` that produced it;
/// callers pass it back unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub String);

/// The login-form elements the agent locates on the portal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PortalField {
    Identifier,
    Passphrase,
    CaptchaImage,
    CaptchaInput,
    Submit,
}

/// A single OCR result: recognized text plus the engine's confidence in [0, 1].
#[derive(Debug, Clone)]
pub struct Recognition {
    pub text: String,
    pub confidence: f32,
}

/// Decrypted credential pair returned by the vault.
///
/// Both fields are `None` until credentials are configured, and revert to
/// `None` whenever the stored set is absent, partial, or fails its integrity
/// check. Either both fields are `Some` or both are `None`.
#[derive(Default)]
pub struct StoredCredentials {
    pub identifier: Option<SecretString>,
    pub passphrase: Option<SecretString>,
}

impl StoredCredentials {
    /// Returns true when both fields decrypted successfully.
    pub fn is_configured(&self) -> bool {
        self.identifier.is_some() && self.passphrase.is_some()
    }
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("identifier", &self.identifier.as_ref().map(|_| "[REDACTED]"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
