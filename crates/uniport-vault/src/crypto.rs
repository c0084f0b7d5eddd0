// SPDX-FileCopyrightText: 2026 Uniport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the
//! system CSPRNG. Nonce reuse under the same key would be catastrophic for
//! GCM security.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

use uniport_core::UniportError;

/// Nonce length in bytes (96 bits, the GCM standard).
pub const NONCE_LEN: usize = 12;

/// Encrypt plaintext with AES-256-GCM using a random 96-bit nonce.
///
/// Returns `(ciphertext_with_tag, nonce_bytes)`. The caller must store both
/// the ciphertext and the nonce to be able to decrypt later.
pub fn seal(
    key: &[u8; 32],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LEN]), UniportError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| UniportError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| UniportError::Vault("failed to generate random nonce".to_string()))?;

    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Seal in place: plaintext buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| UniportError::Vault("AES-256-GCM encryption failed".to_string()))?;

    Ok((in_out, nonce_bytes))
}

/// Decrypt ciphertext with AES-256-GCM.
///
/// `ciphertext` must include the 16-byte authentication tag appended by
/// [`seal`]. Any tag verification failure (wrong key, tampered data,
/// mismatched nonce) surfaces as [`UniportError::Integrity`]; no partial
/// plaintext is ever returned.
pub fn open(
    key: &[u8; 32],
    nonce_bytes: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, UniportError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| UniportError::Vault("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let nonce = Nonce::assume_unique_for_key(*nonce_bytes);

    let mut in_out = ciphertext.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| UniportError::Integrity)?;

    Ok(plaintext.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> [u8; 32] {
        let rng = SystemRandom::new();
        let mut key = [0u8; 32];
        rng.fill(&mut key).unwrap();
        key
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = test_key();
        let plaintext = b"student id and passphrase";

        let (ciphertext, nonce) = seal(&key, plaintext).unwrap();
        let decrypted = open(&key, &nonce, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn seal_produces_different_ciphertext_for_same_plaintext() {
        let key = test_key();
        let plaintext = b"same input twice";

        let (ct1, nonce1) = seal(&key, plaintext).unwrap();
        let (ct2, nonce2) = seal(&key, plaintext).unwrap();

        // Random nonces should differ.
        assert_ne!(nonce1, nonce2);
        // Ciphertext should differ due to different nonces.
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn ciphertext_is_longer_than_plaintext() {
        let key = test_key();
        let (ciphertext, _) = seal(&key, b"hello").unwrap();

        // Ciphertext includes the 16-byte GCM tag.
        assert_eq!(ciphertext.len(), 5 + 16);
    }

    #[test]
    fn open_with_wrong_key_fails_with_integrity_error() {
        let (ciphertext, nonce) = seal(&test_key(), b"secret data").unwrap();
        let result = open(&test_key(), &nonce, &ciphertext);
        assert!(matches!(result, Err(UniportError::Integrity)));
    }

    #[test]
    fn tampered_ciphertext_fails_decryption() {
        let key = test_key();
        let (mut ciphertext, nonce) = seal(&key, b"do not tamper").unwrap();
        ciphertext[0] ^= 0x01;

        let result = open(&key, &nonce, &ciphertext);
        assert!(matches!(result, Err(UniportError::Integrity)));
    }
}
