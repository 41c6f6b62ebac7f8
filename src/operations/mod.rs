//! Liquidity lifecycle operations and the ledger plans they execute.
//!
//! Every operation follows the same shape: validate the request, compute
//! the deltas with [`pools::invariant`](crate::pools::invariant), check the
//! caller's slippage bounds, preflight and execute an effect plan against
//! the [`LedgerAdapter`](crate::traits::LedgerAdapter), then write the
//! updated pool back to the registry.

mod liquidity;
mod plan;

pub use liquidity::LiquidityOperations;
