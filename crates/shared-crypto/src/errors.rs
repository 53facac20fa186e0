//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// Any of these is fatal to the current operation: key and signature
/// material is attacker-influenced and must never be silently coerced.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid signature encoding
    #[error("Invalid signature encoding")]
    InvalidSignature,

    /// Signature verification failed
    #[error("Signature verification failed")]
    VerificationFailed,

    /// Invalid hex input
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },
}
