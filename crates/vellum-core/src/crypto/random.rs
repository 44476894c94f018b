//! Initialization vector sources.
//!
//! Encryption draws one IV per call from an [`IvSource`]. Production code
//! uses [`OsIvSource`]; tests can plug in a deterministic source to pin the
//! exact envelope bytes.

use super::BLOCK_SIZE;
use crate::error::{Result, VellumError};

/// A source of initialization vectors.
pub trait IvSource {
    /// Fill `iv` with fresh bytes.
    ///
    /// # Errors
    ///
    /// Returns `VellumError::EncryptionFailed` if no randomness is available.
    fn fill_iv(&mut self, iv: &mut [u8; BLOCK_SIZE]) -> Result<()>;
}

/// IV source backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsIvSource;

impl IvSource for OsIvSource {
    fn fill_iv(&mut self, iv: &mut [u8; BLOCK_SIZE]) -> Result<()> {
        getrandom::getrandom(iv).map_err(|_| VellumError::EncryptionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_source_produces_distinct_ivs() {
        let mut source = OsIvSource;
        let mut iv1 = [0u8; BLOCK_SIZE];
        let mut iv2 = [0u8; BLOCK_SIZE];
        source.fill_iv(&mut iv1).unwrap();
        source.fill_iv(&mut iv2).unwrap();

        assert_ne!(iv1, iv2);
    }
}
