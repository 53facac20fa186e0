//! Cross-subsystem integration flows.

mod forging_flow;
mod ledger_flow;
