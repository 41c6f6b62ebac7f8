//! Trait seams between the engine and its host.
//!
//! [`LedgerAdapter`] is the only collaborator the liquidity operations
//! call out to; everything else they need is passed in explicitly.

mod ledger_adapter;

pub use ledger_adapter::LedgerAdapter;
