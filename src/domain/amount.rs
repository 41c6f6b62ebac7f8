//! Integer token and share quantities with checked arithmetic.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Rounding;

/// A token or share quantity in the smallest unit of its denom.
///
/// `Amount` is signed so that malformed requests (a negative share amount,
/// a negative initial balance) can be represented and rejected by
/// validation instead of being unrepresentable at the API boundary.  Every
/// balance the engine stores is non-negative.
///
/// Arithmetic methods are checked: they return `None` on overflow or
/// division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(a.checked_sub(&b), Some(Amount::new(-100)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(i128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(i128::MAX);

    /// Creates a new `Amount` from a raw `i128` value.
    pub const fn new(value: i128) -> Self {
        Self(value)
    }

    /// Returns the underlying `i128` value.
    #[must_use]
    pub const fn get(&self) -> i128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is strictly below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the magnitude as `u128`.
    #[must_use]
    pub const fn unsigned_abs(&self) -> u128 {
        self.0.unsigned_abs()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`]: truncates toward zero.
    /// - [`Rounding::Up`]: rounds toward positive infinity.
    /// - [`Rounding::HalfEven`]: rounds to nearest, ties to even.
    ///
    /// Returns `None` if `divisor` is zero or the quotient overflows
    /// (`i128::MIN / -1`).
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0.checked_div(divisor.0)?;
        let r = self.0 % divisor.0;
        let non_negative = (self.0 >= 0) == (divisor.0 > 0);
        let bump = match rounding {
            Rounding::Up => r != 0 && non_negative,
            Rounding::Down => false,
            Rounding::HalfEven => {
                let twice = r.unsigned_abs().checked_mul(2)?;
                rounding.bumps(q % 2 != 0, twice.cmp(&divisor.0.unsigned_abs()), r == 0)
            }
        };
        if !bump {
            return Some(Self(q));
        }
        let step = if non_negative { 1 } else { -1 };
        q.checked_add(step).map(Self)
    }
}

impl From<i128> for Amount {
    fn from(value: i128) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(i128::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i128>().map(Self)
    }
}
