//! # Forge-Chain - Block Codec (Subsystem 03)
//!
//! **Bounded Context:** Canonical block byte contract
//!
//! ## Purpose
//!
//! The bit-exact serialization, hashing, signing and id derivation every
//! node must reproduce identically. Any change to the byte layout here is a
//! consensus-breaking protocol change.
//!
//! ## Canonical Layout
//!
//! Little-endian scalars, fixed widths, in order:
//!
//! ```text
//! version            4 bytes
//! timestamp          4 bytes
//! height             4 bytes
//! previousBlock      8 bytes  (big-endian id magnitude; zeros for genesis)
//! numberOfTransactions  4 bytes
//! totalAmount        8 bytes
//! totalFee           8 bytes
//! reward             8 bytes
//! payloadLength      4 bytes
//! payloadHash       32 bytes
//! generatorPublicKey 33 bytes
//! blockSignature     variable (DER; only when signing is complete)
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Fatal on malformed input**: block data is attacker-influenced; bad
//!    hex or wrong-length keys abort the operation, never coerce
//! 2. **Boolean verification**: an invalid signature on untrusted data is
//!    an expected outcome and reports `false`, not an error
//! 3. **Transactions stay behind a port**: the codec consumes the
//!    transaction collaborator's normalization and identifier bytes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
mod error;
pub mod ports;
mod validation;

pub use adapters::TransferTransactionCodec;
pub use domain::BlockCodec;
pub use error::{CodecError, Result};
pub use ports::TransactionCodec;
