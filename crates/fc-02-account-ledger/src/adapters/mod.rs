//! Reference adapters for the ledger's outbound ports.

mod memory_store;

pub use memory_store::MemoryAccountStore;
