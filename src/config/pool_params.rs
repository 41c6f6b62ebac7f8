//! Per-pool fee and weight-schedule parameters.

use core::time::Duration;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Timestamp, Weight};
use crate::error::{AmmError, Result};
use crate::math::Dec;

/// A linear transition from the pool's current weights to a target set.
///
/// Weights move linearly from their values at `start_time` to
/// `target_weights` over `duration`, evaluated whenever the pool is poked.
/// When `start_time` is `None` the transition starts at pool creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothWeightChange {
    /// When the transition begins; `None` means at pool creation.
    pub start_time: Option<Timestamp>,
    /// How long the transition lasts.
    pub duration: Duration,
    /// Final weight of every pool asset, keyed by denom.
    pub target_weights: BTreeMap<String, Weight>,
}

/// Fee and schedule parameters fixed at pool creation.
///
/// # Validation
///
/// - `swap_fee` and `exit_fee` must lie in `[0, 1)`.
/// - A smooth weight change needs a non-zero duration and valid
///   (`1..=2^20`) target weights.  Whether its denoms match the pool's assets
///   is checked when the pool is built.
///
/// # Examples
///
/// ```
/// use weighted_pools::config::PoolParams;
/// use weighted_pools::math::Dec;
///
/// let Ok(fee) = "0.003".parse::<Dec>() else { panic!() };
/// let params = PoolParams::new(fee, Dec::ZERO, None);
/// assert!(params.is_ok());
///
/// let too_high = PoolParams::new(Dec::ONE, Dec::ZERO, None);
/// assert!(too_high.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    swap_fee: Dec,
    exit_fee: Dec,
    #[serde(default)]
    smooth_weight_change: Option<SmoothWeightChange>,
}

impl PoolParams {
    /// Creates validated pool parameters.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if either fee is outside `[0, 1)`.
    /// - [`AmmError::InvalidConfiguration`] for a zero-length weight change.
    /// - [`AmmError::InvalidWeight`] for a target weight outside `1..=2^20`.
    pub fn new(
        swap_fee: Dec,
        exit_fee: Dec,
        smooth_weight_change: Option<SmoothWeightChange>,
    ) -> Result<Self> {
        let params = Self {
            swap_fee,
            exit_fee,
            smooth_weight_change,
        };
        params.validate()?;
        Ok(params)
    }

    /// Zero fees, no weight schedule.
    #[must_use]
    pub const fn zero_fee() -> Self {
        Self {
            swap_fee: Dec::ZERO,
            exit_fee: Dec::ZERO,
            smooth_weight_change: None,
        }
    }

    /// Validates all parameter invariants.
    ///
    /// # Errors
    ///
    /// Same as [`PoolParams::new`].
    pub fn validate(&self) -> Result<()> {
        if self.swap_fee.is_negative() {
            return Err(AmmError::InvalidFee("swap fee must not be negative"));
        }
        if self.swap_fee >= Dec::ONE {
            return Err(AmmError::InvalidFee("swap fee must be less than one"));
        }
        if self.exit_fee.is_negative() {
            return Err(AmmError::InvalidFee("exit fee must not be negative"));
        }
        if self.exit_fee >= Dec::ONE {
            return Err(AmmError::InvalidFee("exit fee must be less than one"));
        }
        if let Some(change) = &self.smooth_weight_change {
            if change.duration.is_zero() {
                return Err(AmmError::InvalidConfiguration(
                    "smooth weight change duration must be positive",
                ));
            }
            if change.target_weights.is_empty() {
                return Err(AmmError::InvalidConfiguration(
                    "smooth weight change needs target weights",
                ));
            }
            for weight in change.target_weights.values() {
                weight.validate()?;
            }
        }
        Ok(())
    }

    /// Fee charged on the swap-like share of single-asset joins and exits.
    pub const fn swap_fee(&self) -> Dec {
        self.swap_fee
    }

    /// Fee charged on every exit.
    pub const fn exit_fee(&self) -> Dec {
        self.exit_fee
    }

    /// Scheduled weight transition, if any.
    #[must_use]
    pub const fn smooth_weight_change(&self) -> Option<&SmoothWeightChange> {
        self.smooth_weight_change.as_ref()
    }
}

impl Default for PoolParams {
    fn default() -> Self {
        Self::zero_fee()
    }
}
