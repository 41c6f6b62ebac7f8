//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use weighted_pools::prelude::*;
//! ```

pub use crate::config::{ModuleParams, PoolParams, SmoothWeightChange};
pub use crate::domain::{
    Address, Amount, Coin, Coins, FutureGovernor, LiquidityReceipt, PoolAsset, Rounding,
    Timestamp, Weight,
};
pub use crate::error::{AmmError, ErrorKind, Result};
pub use crate::ledger::InMemoryLedger;
pub use crate::math::{CheckedArithmetic, Dec};
pub use crate::operations::LiquidityOperations;
pub use crate::pools::{Pool, ScheduledChange, INIT_POOL_SHARES_SUPPLY, ONE_SHARE};
pub use crate::registry::PoolRegistry;
pub use crate::traits::LedgerAdapter;
