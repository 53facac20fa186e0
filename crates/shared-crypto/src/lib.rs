//! # Forge-Chain - Shared Crypto
//!
//! The signing/verification primitive behind the block codec and the
//! account ledger.
//!
//! ## Contents
//!
//! - [`hashing`]: SHA-256, one-shot and streaming (payload digests are
//!   accumulated incrementally during block assembly)
//! - [`ecdsa`]: secp256k1 keypairs, DER signatures, compressed public keys
//! - [`address`]: account address derivation from a public key
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Secret key material is zeroized on drop
//! - Verification of untrusted signatures never panics

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod ecdsa;
mod errors;
pub mod hashing;

pub use address::{derive_address, is_valid_address};
pub use ecdsa::{KeyPair, PublicKey, Signature};
pub use errors::CryptoError;
pub use hashing::{sha256, Hash, Sha256Hasher};
