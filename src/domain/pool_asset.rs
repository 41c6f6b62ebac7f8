//! A single weighted reserve inside a pool.

use serde::{Deserialize, Serialize};

use super::{Amount, Coin, Weight};

/// One reserve of a weighted pool: a balance of some denom plus its weight.
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::{Amount, PoolAsset, Weight};
///
/// let asset = PoolAsset::new("foo", Amount::new(5_000_000), Weight::new(100));
/// assert_eq!(asset.denom(), "foo");
/// assert_eq!(asset.balance(), Amount::new(5_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolAsset {
    /// Denom and current reserve balance.
    pub token: Coin,
    /// Unnormalized weight.
    pub weight: Weight,
}

impl PoolAsset {
    /// Creates a pool asset.
    #[must_use]
    pub fn new(denom: impl Into<String>, balance: Amount, weight: Weight) -> Self {
        Self {
            token: Coin::new(denom, balance),
            weight,
        }
    }

    /// Asset denom.
    #[must_use]
    pub fn denom(&self) -> &str {
        &self.token.denom
    }

    /// Current reserve balance.
    pub const fn balance(&self) -> Amount {
        self.token.amount
    }
}
