//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module stretches a passphrase and salt into an AES-256 key. The
//! iteration count and output length are protocol constants shared by
//! encryption and decryption.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use super::{KDF_ITERATIONS, KEY_LENGTH};
use crate::error::{Result, VellumError};

/// A cryptographic key derived from a passphrase.
///
/// This type ensures that key material is securely zeroized from memory
/// when dropped, reducing the window of exposure.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a passphrase using PBKDF2-HMAC-SHA256.
///
/// # Arguments
///
/// * `passphrase` - The passphrase bytes (must be non-empty)
/// * `salt` - The salt bytes (must be non-empty; unique per context)
///
/// # Errors
///
/// - `VellumError::InvalidPassphrase` if the passphrase is empty
/// - `VellumError::InvalidSalt` if the salt is empty
/// - `VellumError::KeyDerivationFailed` if the PRF cannot be initialized
///
/// Validation happens before any derivation work.
///
/// # Examples
///
/// ```
/// use vellum_core::crypto::derive_key;
///
/// let key = derive_key(b"my-passphrase", b"my-salt").unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(VellumError::InvalidPassphrase);
    }
    if salt.is_empty() {
        return Err(VellumError::InvalidSalt);
    }

    derive_key_with_rounds(passphrase, salt, KDF_ITERATIONS)
}

fn derive_key_with_rounds(passphrase: &[u8], salt: &[u8], rounds: u32) -> Result<DerivedKey> {
    let mut key = DerivedKey {
        key: [0u8; KEY_LENGTH],
    };
    pbkdf2::pbkdf2::<Hmac<Sha256>>(passphrase, salt, rounds, &mut key.key)
        .map_err(|_| VellumError::KeyDerivationFailed)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc7914_vector() {
        // RFC 7914 section 11, PBKDF2-HMAC-SHA256, c = 1 (first 32 bytes)
        let key = derive_key_with_rounds(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_full_iteration_vector() {
        let key = derive_key(b"password", b"salt").unwrap();
        assert_eq!(
            hex::encode(key.as_bytes()),
            "485fb4210c882c6b3b412edb8363f111afcc4fe46723fe98816459e87e458317"
        );
    }

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key(b"test-passphrase", b"salt-one").unwrap();
        let key2 = derive_key(b"test-passphrase", b"salt-one").unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key(b"test-passphrase", b"salt-one").unwrap();
        let key2 = derive_key(b"test-passphrase", b"salt-two").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key(b"", b"salt");
        assert_eq!(result.unwrap_err(), VellumError::InvalidPassphrase);
    }

    #[test]
    fn test_empty_salt_rejected() {
        let result = derive_key(b"passphrase", b"");
        assert_eq!(result.unwrap_err(), VellumError::InvalidSalt);
    }

    #[test]
    fn test_passphrase_checked_before_salt() {
        let result = derive_key(b"", b"");
        assert_eq!(result.unwrap_err(), VellumError::InvalidPassphrase);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key_with_rounds(b"test-passphrase", b"salt", 1).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
