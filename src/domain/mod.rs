//! Fundamental domain value types used throughout the pool engine.
//!
//! This module contains the value types that model weighted pools:
//! accounts, amounts, coins, weights, timestamps, and governor
//! descriptors.  Newtypes keep raw integers from being mixed up; the
//! validating constructors live where the invariant is owned.

mod address;
mod amount;
mod coin;
mod governor;
mod pool_asset;
mod receipt;
mod rounding;
mod timestamp;
mod weight;

pub use address::Address;
pub use amount::Amount;
pub use coin::{validate_denom, Coin, Coins};
pub use governor::FutureGovernor;
pub use pool_asset::PoolAsset;
pub use receipt::LiquidityReceipt;
pub use rounding::Rounding;
pub use timestamp::Timestamp;
pub use weight::Weight;
