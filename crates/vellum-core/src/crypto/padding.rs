//! PKCS#7 block padding.
//!
//! Padding appends `n` bytes of value `n`, where `n` is in `1..=block_size`.
//! Input that is already block aligned gains a full extra block, so removal
//! is always unambiguous.

use crate::error::{Result, VellumError};

/// Largest block size whose pad length still fits in one byte.
const MAX_BLOCK_SIZE: usize = u8::MAX as usize;

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(VellumError::InvalidBlockSize);
    }
    Ok(())
}

/// Pad `data` to a multiple of `block_size`.
///
/// # Errors
///
/// - `VellumError::InvalidBlockSize` if `block_size` is 0 or above 255
/// - `VellumError::InvalidData` if `data` is empty
///
/// # Examples
///
/// ```
/// use vellum_core::crypto::pad;
///
/// let padded = pad(b"YELLOW SUBMARINE", 16).unwrap();
/// assert_eq!(padded.len(), 32);
/// assert!(padded[16..].iter().all(|&b| b == 16));
/// ```
pub fn pad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    check_block_size(block_size)?;
    if data.is_empty() {
        return Err(VellumError::InvalidData);
    }

    let n = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + n);
    padded.extend_from_slice(data);
    // n <= block_size <= 255
    padded.resize(data.len() + n, n as u8);
    Ok(padded)
}

/// Validate and strip padding from `data`.
///
/// Every one of the `n` trailing bytes is compared, with no early exit, so a
/// partially valid pad is never accepted.
///
/// # Errors
///
/// - `VellumError::InvalidBlockSize` if `block_size` is 0 or above 255
/// - `VellumError::InvalidData` if `data` is empty
/// - `VellumError::InvalidPadding` if `data` is not block aligned or its
///   trailing bytes are not a valid pad
pub fn unpad(data: &[u8], block_size: usize) -> Result<Vec<u8>> {
    check_block_size(block_size)?;
    let Some(&last) = data.last() else {
        return Err(VellumError::InvalidData);
    };

    let n = usize::from(last);
    if data.len() % block_size != 0 || n == 0 || n > block_size {
        return Err(VellumError::InvalidPadding);
    }

    let split = data.len() - n;
    let mismatch = data[split..]
        .iter()
        .fold(0u8, |acc, &byte| acc | (byte ^ last));
    if mismatch != 0 {
        return Err(VellumError::InvalidPadding);
    }

    Ok(data[..split].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_partial_block() {
        let padded = pad(b"hello", 16).unwrap();
        assert_eq!(padded.len(), 16);
        assert_eq!(&padded[..5], b"hello");
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn test_pad_exact_multiple_adds_full_block() {
        let data = [0xAAu8; 16];
        let padded = pad(&data, 16).unwrap();
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[..16], &data);
        assert_eq!(&padded[16..], &[0x10u8; 16]);
    }

    #[test]
    fn test_pad_one_short_of_block() {
        let padded = pad(&[7u8; 15], 16).unwrap();
        assert_eq!(padded.len(), 16);
        assert_eq!(padded[15], 1);
    }

    #[test]
    fn test_round_trip_various_lengths() {
        for len in 1..=64 {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let padded = pad(&data, 16).unwrap();
            assert_eq!(padded.len() % 16, 0);
            assert!(padded.len() > data.len());
            assert_eq!(unpad(&padded, 16).unwrap(), data);
        }
    }

    #[test]
    fn test_round_trip_other_block_sizes() {
        for block_size in [1usize, 8, 255] {
            let padded = pad(b"some data", block_size).unwrap();
            assert_eq!(padded.len() % block_size, 0);
            assert_eq!(unpad(&padded, block_size).unwrap(), b"some data");
        }
    }

    #[test]
    fn test_invalid_block_size() {
        assert_eq!(pad(b"x", 0).unwrap_err(), VellumError::InvalidBlockSize);
        assert_eq!(pad(b"x", 256).unwrap_err(), VellumError::InvalidBlockSize);
        assert_eq!(unpad(b"x", 0).unwrap_err(), VellumError::InvalidBlockSize);
    }

    #[test]
    fn test_block_size_checked_before_data() {
        assert_eq!(pad(b"", 0).unwrap_err(), VellumError::InvalidBlockSize);
        assert_eq!(unpad(b"", 0).unwrap_err(), VellumError::InvalidBlockSize);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(pad(b"", 16).unwrap_err(), VellumError::InvalidData);
        assert_eq!(unpad(b"", 16).unwrap_err(), VellumError::InvalidData);
    }

    #[test]
    fn test_unpad_misaligned() {
        let mut data = vec![0u8; 17];
        data[16] = 1;
        assert_eq!(unpad(&data, 16).unwrap_err(), VellumError::InvalidPadding);
    }

    #[test]
    fn test_unpad_zero_pad_byte() {
        let data = [0u8; 16];
        assert_eq!(unpad(&data, 16).unwrap_err(), VellumError::InvalidPadding);
    }

    #[test]
    fn test_unpad_pad_byte_exceeds_block() {
        let mut data = [0x11u8; 32];
        data[31] = 17;
        assert_eq!(unpad(&data, 16).unwrap_err(), VellumError::InvalidPadding);
    }

    #[test]
    fn test_unpad_rejects_partial_forgery() {
        // Only the first of four pad bytes is wrong.
        let mut data = [0u8; 16];
        data[12..].copy_from_slice(&[3, 4, 4, 4]);
        assert_eq!(unpad(&data, 16).unwrap_err(), VellumError::InvalidPadding);

        // Only the middle byte is wrong.
        data[12..].copy_from_slice(&[4, 4, 9, 4]);
        assert_eq!(unpad(&data, 16).unwrap_err(), VellumError::InvalidPadding);
    }

    #[test]
    fn test_unpad_full_block_of_padding() {
        let mut data = vec![b'a'; 16];
        data.extend_from_slice(&[16u8; 16]);
        assert_eq!(unpad(&data, 16).unwrap(), vec![b'a'; 16]);
    }
}
