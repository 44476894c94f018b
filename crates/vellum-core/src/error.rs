//! Error types for Vellum core operations.
//!
//! Every fallible operation in the core returns one of these variants to its
//! immediate caller. Input validation errors are always reported before any
//! cryptographic work starts. The CLI layer maps them to user-facing
//! messages and exit codes.

use thiserror::Error;

/// Result type alias for Vellum operations.
pub type Result<T> = std::result::Result<T, VellumError>;

/// Core error type for Vellum operations.
///
/// The variants are mutually exclusive. None of them carries secret material,
/// so they are safe to display and log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VellumError {
    /// Plaintext or envelope empty, or envelope length malformed
    #[error("invalid data on input (empty or unpadded)")]
    InvalidData,

    /// Passphrase empty
    #[error("invalid passphrase on input (empty)")]
    InvalidPassphrase,

    /// Salt empty
    #[error("invalid salt on input (empty)")]
    InvalidSalt,

    /// Block size outside what the padding codec can encode
    #[error("invalid block size")]
    InvalidBlockSize,

    /// Padding malformed on removal
    ///
    /// This is also what a wrong passphrase or salt looks like.
    #[error("invalid padding on input")]
    InvalidPadding,

    /// The key derivation primitive could not be initialized
    #[error("key derivation failed")]
    KeyDerivationFailed,

    /// Key derivation, randomness or cipher setup failed while encrypting
    #[error("encryption failed")]
    EncryptionFailed,

    /// Key derivation or cipher setup failed while decrypting
    #[error("decryption failed")]
    DecryptionFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let all = [
            VellumError::InvalidData,
            VellumError::InvalidPassphrase,
            VellumError::InvalidSalt,
            VellumError::InvalidBlockSize,
            VellumError::InvalidPadding,
            VellumError::KeyDerivationFailed,
            VellumError::EncryptionFailed,
            VellumError::DecryptionFailed,
        ];
        let messages: std::collections::HashSet<String> =
            all.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn test_padding_message() {
        assert_eq!(
            VellumError::InvalidPadding.to_string(),
            "invalid padding on input"
        );
    }
}
