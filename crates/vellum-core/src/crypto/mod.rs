//! Cryptographic operations for Vellum.
//!
//! This module provides passphrase-based encryption built from
//! well-audited RustCrypto primitives:
//! - **PBKDF2-HMAC-SHA256**: key stretching (250,000 iterations)
//! - **AES-256-CBC**: block encryption with a random IV per call
//! - **PKCS#7**: byte-value block padding
//!
//! ## Protocol Constants
//!
//! Every constant below is part of the envelope format. Changing any of them
//! makes existing envelopes unreadable, so none of them is configurable.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of an encrypted file
//! - Offline brute-force attacks on the passphrase (slowed by PBKDF2)
//!
//! We do NOT defend against:
//! - Tampering: the envelope carries no integrity tag. Flipping a bit in
//!   ciphertext block `i` garbles plaintext block `i` and flips the same bit
//!   in plaintext block `i + 1`, unless the padding check catches it.
//! - Compromised OS / keylogger
//! - Access to process memory during an operation

pub mod cipher;
pub mod key;
pub mod padding;
pub mod random;

pub use cipher::{decrypt, encrypt, encrypt_with};
pub use key::{derive_key, DerivedKey};
pub use padding::{pad, unpad};
pub use random::{IvSource, OsIvSource};

/// Cipher block size in bytes (AES).
pub const BLOCK_SIZE: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LENGTH: usize = 32;

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 250_000;

/// Smallest valid envelope: one IV block plus one ciphertext block.
pub const MIN_ENVELOPE_LENGTH: usize = 2 * BLOCK_SIZE;
