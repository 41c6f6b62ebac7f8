//! Ledger implementations shipped with the crate.

mod in_memory;

pub use in_memory::InMemoryLedger;
