//! # Vellum Core
//!
//! Core library for Vellum - passphrase-based file encryption with a fixed,
//! self-describing envelope format.
//!
//! This crate provides the cryptographic primitive and a few filesystem
//! helpers, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **crypto::key**: PBKDF2-HMAC-SHA256 key derivation
//! - **crypto::padding**: PKCS#7 block padding
//! - **crypto::cipher**: AES-256-CBC envelope encryption/decryption
//! - **crypto::random**: IV sources (OS randomness, injectable for tests)
//! - **fs**: existence checks, directory listing, atomic writes
//!
//! ## Envelope
//!
//! ```text
//! envelope := IV (16 bytes) || CIPHERTEXT (N * 16 bytes, N >= 1)
//! ```

pub mod crypto;
pub mod error;
pub mod fs;

pub use crypto::{decrypt, encrypt, encrypt_with};
pub use error::{Result, VellumError};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
