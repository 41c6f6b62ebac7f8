//! Unnormalized asset weights.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AmmError, Result};

/// Relative weight of a pool asset.
///
/// Weights are unnormalized: a pool with weights `100` and `200` prices
/// its assets exactly like one with `1` and `2`.  A valid weight is
/// strictly positive and at most [`Weight::MAX`]; [`Weight::new`] does not
/// enforce that so the pool validator can report a precise error.
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::Weight;
///
/// let w = Weight::new(100);
/// assert!(w.validate().is_ok());
/// assert!(Weight::new(0).validate().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Weight(i128);

impl Weight {
    /// Zero weight (invalid for a pool asset).
    pub const ZERO: Self = Self(0);

    /// Largest weight a pool asset may carry (`2^20`).
    pub const MAX: Self = Self(1 << 20);

    /// Wraps a raw weight.
    pub const fn new(value: i128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> i128 {
        self.0
    }

    /// Checks that the weight lies in `1..=2^20`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidWeight`] for zero, negative, or oversized
    /// weights.
    pub const fn validate(&self) -> Result<()> {
        if self.0 <= 0 {
            return Err(AmmError::InvalidWeight("weight must be greater than zero"));
        }
        if self.0 > Self::MAX.0 {
            return Err(AmmError::InvalidWeight("weight exceeds the maximum of 2^20"));
        }
        Ok(())
    }

    /// Checked addition, used to accumulate a pool's total weight.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum overflows.
    pub const fn safe_add(&self, other: &Self) -> Result<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::Overflow("total weight overflow")),
        }
    }
}

impl From<u64> for Weight {
    fn from(value: u64) -> Self {
        Self(i128::from(value))
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert!(Weight::new(1).validate().is_ok());
        assert!(matches!(
            Weight::new(0).validate(),
            Err(AmmError::InvalidWeight(_))
        ));
        assert!(Weight::new(-5).validate().is_err());
    }

    #[test]
    fn validation_caps_at_max() {
        assert!(Weight::MAX.validate().is_ok());
        assert!(matches!(
            Weight::new(Weight::MAX.get() + 1).validate(),
            Err(AmmError::InvalidWeight(_))
        ));
        assert!(Weight::new(10i128.pow(19)).validate().is_err());
    }

    #[test]
    fn safe_add() {
        assert_eq!(
            Weight::new(100).safe_add(&Weight::new(200)),
            Ok(Weight::new(300))
        );
        assert!(Weight::new(i128::MAX).safe_add(&Weight::new(1)).is_err());
    }
}
