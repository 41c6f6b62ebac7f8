//! Ownership of pool records and identifier assignment.

mod pool_registry;

pub use pool_registry::PoolRegistry;
