//! AES-256-CBC envelope encryption/decryption.
//!
//! An envelope is the random IV followed by the padded ciphertext:
//!
//! ```text
//! envelope := IV (16 bytes) || CIPHERTEXT (N * 16 bytes, N >= 1)
//! ```
//!
//! The key is re-derived from (passphrase, salt) on every call and dropped
//! (zeroized) before the call returns. There is no key cache.

use aes::Aes256;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use super::key::derive_key;
use super::padding::{pad, unpad};
use super::random::{IvSource, OsIvSource};
use super::{BLOCK_SIZE, MIN_ENVELOPE_LENGTH};
use crate::error::{Result, VellumError};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

fn validate_inputs(data: &[u8], passphrase: &str, salt: &str) -> Result<()> {
    if data.is_empty() {
        return Err(VellumError::InvalidData);
    }
    if passphrase.is_empty() {
        return Err(VellumError::InvalidPassphrase);
    }
    if salt.is_empty() {
        return Err(VellumError::InvalidSalt);
    }
    Ok(())
}

/// Encrypt `plaintext` into a fresh envelope using OS randomness for the IV.
///
/// # Errors
///
/// - `VellumError::InvalidData` / `InvalidPassphrase` / `InvalidSalt` for
///   empty inputs, checked in that order before any key derivation
/// - `VellumError::EncryptionFailed` if key derivation, randomness or
///   cipher setup fails
///
/// # Examples
///
/// ```
/// use vellum_core::{decrypt, encrypt};
///
/// let envelope = encrypt(b"secret data", "my-passphrase", "my-salt").unwrap();
/// assert_eq!(envelope.len() % 16, 0);
///
/// let plaintext = decrypt(&envelope, "my-passphrase", "my-salt").unwrap();
/// assert_eq!(plaintext, b"secret data");
/// ```
pub fn encrypt(plaintext: &[u8], passphrase: &str, salt: &str) -> Result<Vec<u8>> {
    encrypt_with(plaintext, passphrase, salt, &mut OsIvSource)
}

/// Encrypt `plaintext` drawing the IV from `iv_source`.
///
/// Same contract as [`encrypt`]; a failing `iv_source` is reported as
/// `VellumError::EncryptionFailed`.
pub fn encrypt_with<S>(
    plaintext: &[u8],
    passphrase: &str,
    salt: &str,
    iv_source: &mut S,
) -> Result<Vec<u8>>
where
    S: IvSource + ?Sized,
{
    validate_inputs(plaintext, passphrase, salt)?;

    let key = derive_key(passphrase.as_bytes(), salt.as_bytes())
        .map_err(|_| VellumError::EncryptionFailed)?;

    let padded = Zeroizing::new(pad(plaintext, BLOCK_SIZE)?);

    let mut iv = [0u8; BLOCK_SIZE];
    iv_source
        .fill_iv(&mut iv)
        .map_err(|_| VellumError::EncryptionFailed)?;

    let mut envelope = Vec::with_capacity(BLOCK_SIZE + padded.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&padded);

    let body = &mut envelope[BLOCK_SIZE..];
    let body_len = body.len();
    Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| VellumError::EncryptionFailed)?
        .encrypt_padded_mut::<NoPadding>(body, body_len)
        .map_err(|_| VellumError::EncryptionFailed)?;

    Ok(envelope)
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
///
/// - `VellumError::InvalidData` / `InvalidPassphrase` / `InvalidSalt` for
///   empty inputs, checked in that order
/// - `VellumError::InvalidData` if the envelope is not block aligned or is
///   shorter than an IV plus one ciphertext block
/// - `VellumError::DecryptionFailed` if key derivation or cipher setup fails
/// - `VellumError::InvalidPadding` if the decrypted padding is malformed,
///   which is what a wrong passphrase, wrong salt or corrupted envelope
///   almost always produces
pub fn decrypt(envelope: &[u8], passphrase: &str, salt: &str) -> Result<Vec<u8>> {
    validate_inputs(envelope, passphrase, salt)?;

    if envelope.len() % BLOCK_SIZE != 0 || envelope.len() < MIN_ENVELOPE_LENGTH {
        return Err(VellumError::InvalidData);
    }
    let (iv, ciphertext) = envelope.split_at(BLOCK_SIZE);

    let key = derive_key(passphrase.as_bytes(), salt.as_bytes())
        .map_err(|_| VellumError::DecryptionFailed)?;

    let mut padded = Zeroizing::new(ciphertext.to_vec());
    Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| VellumError::DecryptionFailed)?
        .decrypt_padded_mut::<NoPadding>(&mut padded[..])
        .map_err(|_| VellumError::DecryptionFailed)?;

    unpad(&padded, BLOCK_SIZE)
}
