// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master secret resolution.
//!
//! By default the vault encrypts under a secret embedded in the application
//! itself. This protects stored credentials against casual local inspection
//! only -- anyone who can read this source can derive the key -- and is a
//! deliberate policy choice, not a strong security boundary. Operators who
//! want real confidentiality set `UNIPORT_VAULT_KEY` to a secret of their
//! own; records written under one master secret cannot be opened under
//! another.

use secrecy::SecretString;

/// Environment variable that overrides the embedded master secret.
pub const VAULT_KEY_ENV_VAR: &str = "UNIPORT_VAULT_KEY";

/// The application-embedded default. Shared by every installation that does
/// not set [`VAULT_KEY_ENV_VAR`].
const EMBEDDED_MASTER_SECRET: &str = "uniport-portal-credential-guard-v1";

/// Resolve the master secret: `UNIPORT_VAULT_KEY` if set and non-empty,
/// otherwise the embedded default.
pub fn master_secret() -> SecretString {
    if let Ok(key) = std::env::var(VAULT_KEY_ENV_VAR)
        && !key.is_empty()
    {
        return SecretString::from(key);
    }
    SecretString::from(EMBEDDED_MASTER_SECRET.to_string())
}
