//! Reference adapters for the codec's outbound ports.

mod transfer;

pub use transfer::TransferTransactionCodec;
