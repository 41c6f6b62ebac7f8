//! In-memory pool store keyed by sequential identifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Coins, Timestamp};
use crate::error::{AmmError, Result};
use crate::pools::{Pool, ScheduledChange};

/// Owns every pool record and hands out snapshots.
///
/// Identifiers are assigned sequentially from `1`.  Callers read pools as
/// cloned snapshots and write them back with [`PoolRegistry::set_pool`];
/// nothing outside the registry holds a live reference to a pool.
///
/// # Examples
///
/// ```
/// use weighted_pools::registry::PoolRegistry;
///
/// let registry = PoolRegistry::new();
/// assert_eq!(registry.next_pool_id(), 1);
/// assert!(registry.get_pool(1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistry {
    pools: BTreeMap<u64, Pool>,
    next_pool_id: u64,
}

impl PoolRegistry {
    /// Creates an empty registry whose first pool gets id `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pools: BTreeMap::new(),
            next_pool_id: 1,
        }
    }

    /// Identifier the next created pool must carry.
    #[must_use]
    pub const fn next_pool_id(&self) -> u64 {
        self.next_pool_id
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Stores a freshly built pool and advances the id counter.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the pool's id is not
    ///   [`next_pool_id`](Self::next_pool_id).
    /// - [`AmmError::Overflow`] if the id counter is exhausted.
    pub fn create_pool(&mut self, pool: Pool) -> Result<u64> {
        let id = pool.id();
        if id != self.next_pool_id {
            return Err(AmmError::InvalidConfiguration(
                "pool id must equal the next pool id",
            ));
        }
        let next = self
            .next_pool_id
            .checked_add(1)
            .ok_or(AmmError::Overflow("pool id counter exhausted"))?;
        self.pools.insert(id, pool);
        self.next_pool_id = next;
        debug!(pool_id = id, "registered pool");
        Ok(id)
    }

    /// Snapshot of pool `id` as last stored, without applying due changes.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no such pool exists.
    pub fn get_pool(&self, id: u64) -> Result<Pool> {
        self.pools.get(&id).cloned().ok_or(AmmError::PoolNotFound(id))
    }

    /// Applies the changes of pool `id` due at `now`, then returns a
    /// snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if no such pool exists.
    /// - Any error raised while applying a scheduled change.
    pub fn get_pool_and_poke(&mut self, id: u64, now: Timestamp) -> Result<Pool> {
        let pool = self.pools.get_mut(&id).ok_or(AmmError::PoolNotFound(id))?;
        pool.poke(now)?;
        Ok(pool.clone())
    }

    /// Pokes every pool at `now` and returns snapshots in id order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while applying a scheduled change.
    pub fn pools_and_poke(&mut self, now: Timestamp) -> Result<Vec<Pool>> {
        self.pools
            .values_mut()
            .map(|pool| {
                pool.poke(now)?;
                Ok(pool.clone())
            })
            .collect()
    }

    /// Replaces the stored record of an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if the pool was never created.
    pub fn set_pool(&mut self, pool: Pool) -> Result<()> {
        let slot = self
            .pools
            .get_mut(&pool.id())
            .ok_or(AmmError::PoolNotFound(pool.id()))?;
        *slot = pool;
        Ok(())
    }

    /// Queues `change` on pool `id`; it applies on the first poke at or
    /// after its effective time.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if no such pool exists.
    /// - Any error from [`Pool::schedule`] for a malformed weight transition;
    ///   the stored pool is then unchanged.
    pub fn schedule_change(&mut self, id: u64, change: ScheduledChange) -> Result<()> {
        let pool = self.pools.get_mut(&id).ok_or(AmmError::PoolNotFound(id))?;
        debug!(pool_id = id, ?change, "scheduling change");
        pool.schedule(change)
    }

    /// Reserve balances summed per denom across every pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a per-denom total overflows.
    pub fn total_liquidity(&self) -> Result<Coins> {
        let mut total = Coins::new();
        for pool in self.pools.values() {
            total.add_all(&pool.balances()?)?;
        }
        Ok(total)
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
