// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from the master secret.
//!
//! Derives a 32-byte key with a deliberately large iteration count to impose
//! computational cost on brute-force guessing of the password. Identical
//! (password, salt) inputs always yield the identical key, which is what
//! makes decryption possible without ever persisting the key.

use std::num::NonZeroU32;

use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use uniport_core::UniportError;

/// PBKDF2 iteration count. Fixed: stored records can only be opened with the
/// same count, so changing it invalidates every existing record.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derive a 32-byte key from a password and salt.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
) -> Result<Zeroizing<[u8; 32]>, UniportError> {
    let iterations = NonZeroU32::new(KDF_ITERATIONS)
        .ok_or_else(|| UniportError::Vault("KDF iteration count must be non-zero".to_string()))?;

    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        key.as_mut(),
    );
    Ok(key)
}

/// Generate a fresh random 16-byte salt from the system CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN], UniportError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| UniportError::Vault("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic() {
        let salt = [1u8; SALT_LEN];
        let key1 = derive_key(b"master secret", &salt).unwrap();
        let key2 = derive_key(b"master secret", &salt).unwrap();
        assert_eq!(*key1, *key2);
    }

    #[test]
    fn different_password_produces_different_key() {
        let salt = [2u8; SALT_LEN];
        let key1 = derive_key(b"password one", &salt).unwrap();
        let key2 = derive_key(b"password two", &salt).unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn different_salt_produces_different_key() {
        let key1 = derive_key(b"same password", &[1u8; SALT_LEN]).unwrap();
        let key2 = derive_key(b"same password", &[2u8; SALT_LEN]).unwrap();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn generate_salt_produces_random_values() {
        let salt1 = generate_salt().unwrap();
        let salt2 = generate_salt().unwrap();
        assert_ne!(salt1, salt2);
    }
}
