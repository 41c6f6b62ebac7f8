//! Weighted pools: the pool entity, its scheduled changes, and the pure
//! invariant math behind every liquidity event.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `pool` | [`Pool`] and its structural validation |
//! | `schedule` | [`ScheduledChange`], applied lazily on [`Pool::poke`] |
//! | [`invariant`] | share/amount formulas for joins and exits |

pub mod invariant;
mod pool;
mod schedule;

#[cfg(test)]
mod proptest_properties;

pub use pool::{share_denom, Pool, INIT_POOL_SHARES_SUPPLY, ONE_SHARE};
pub use schedule::ScheduledChange;
