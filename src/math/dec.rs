//! Deterministic 18-decimal fixed-point numbers.
//!
//! [`Dec`] is the numeric type behind every ratio, fee, and power in the
//! pool engine.  A value is stored as a sign plus a 256-bit magnitude of
//! "atoms", where one atom is `10^-18`.
//!
//! # Rounding rules
//!
//! | Operation | Rule |
//! |-----------|------|
//! | [`Dec::checked_mul`] | exact 512-bit product, then round half-to-even at 18 decimals |
//! | [`Dec::checked_quo`] | truncate `a * 10^36 / b`, then round half-to-even at 18 decimals |
//! | [`Dec::mul_int`] | exact |
//! | [`Dec::quo_int`] | truncate toward zero |
//! | [`Dec::truncate_int`] | truncate toward zero |
//!
//! These rules are fixed: two nodes that feed the same inputs through the
//! same sequence of operations get the same bits back.
//!
//! # Examples
//!
//! ```
//! use weighted_pools::math::Dec;
//!
//! let Ok(third) = Dec::from_int(1).checked_quo(&Dec::from_int(3)) else { panic!() };
//! assert_eq!(third.to_string(), "0.333333333333333333");
//!
//! let Ok(two_thirds) = Dec::from_int(2).checked_quo(&Dec::from_int(3)) else { panic!() };
//! assert_eq!(two_thirds.to_string(), "0.666666666666666667");
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::Neg;
use core::str::FromStr;

use alloy_primitives::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::checked::div_rounded;
use crate::domain::{Amount, Rounding};
use crate::error::{AmmError, Result};

/// Number of decimal places.
pub const PRECISION: u32 = 18;

const ONE_ATOMS: u64 = 1_000_000_000_000_000_000;
const ONE_U256: U256 = U256::from_limbs([ONE_ATOMS, 0, 0, 0]);
const ONE_U512: U512 = U512::from_limbs([ONE_ATOMS, 0, 0, 0, 0, 0, 0, 0]);

/// A signed fixed-point decimal with 18 fractional digits.
///
/// Zero is never negative, so derived equality is value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dec {
    negative: bool,
    atoms: U256,
}

impl Dec {
    /// `0`.
    pub const ZERO: Self = Self {
        negative: false,
        atoms: U256::ZERO,
    };

    /// `1`.
    pub const ONE: Self = Self {
        negative: false,
        atoms: ONE_U256,
    };

    /// Builds a non-negative value from its raw atom count.
    #[must_use]
    pub const fn from_atoms(atoms: U256) -> Self {
        Self {
            negative: false,
            atoms,
        }
    }

    fn signed(negative: bool, atoms: U256) -> Self {
        Self {
            negative: negative && !atoms.is_zero(),
            atoms,
        }
    }

    /// Converts an integer.
    #[must_use]
    pub fn from_int(value: i128) -> Self {
        // |i128| * 10^18 < 2^188, far inside U256
        let atoms = U256::from(value.unsigned_abs()).saturating_mul(ONE_U256);
        Self::signed(value < 0, atoms)
    }

    /// Converts an [`Amount`].
    #[must_use]
    pub fn from_amount(amount: Amount) -> Self {
        Self::from_int(amount.get())
    }

    /// Raw magnitude in atoms (`10^-18` units).
    #[must_use]
    pub const fn atoms(&self) -> U256 {
        self.atoms
    }

    /// Returns `true` for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.atoms.is_zero()
    }

    /// Returns `true` for values strictly below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` for values strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.atoms.is_zero()
    }

    /// Returns `|self - other|` and whether `self < other`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the difference exceeds 256 bits.
    pub fn abs_diff(&self, other: &Self) -> Result<(Self, bool)> {
        let d = self.checked_sub(other)?;
        Ok((Self::signed(false, d.atoms), d.negative))
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the magnitude exceeds 256 bits.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.negative == other.negative {
            let atoms = self
                .atoms
                .checked_add(other.atoms)
                .ok_or(AmmError::Overflow("decimal addition overflow"))?;
            return Ok(Self::signed(self.negative, atoms));
        }
        // opposite signs: the larger magnitude keeps its sign
        if self.atoms >= other.atoms {
            Ok(Self::signed(self.negative, self.atoms - other.atoms))
        } else {
            Ok(Self::signed(other.negative, other.atoms - self.atoms))
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the magnitude exceeds 256 bits.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.checked_add(&-*other)
    }

    /// Multiplication, rounded half-to-even at 18 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let product = U512::from(self.atoms)
            .checked_mul(U512::from(other.atoms))
            .ok_or(AmmError::Overflow("decimal multiplication overflow"))?;
        let chopped = div_rounded(product, ONE_U512, Rounding::HalfEven)?;
        let atoms = U256::checked_from_uint(chopped)
            .ok_or(AmmError::Overflow("decimal multiplication overflow"))?;
        Ok(Self::signed(self.negative != other.negative, atoms))
    }

    /// Division: truncate at 36 decimals, then round half-to-even to 18.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `other` is zero.
    /// - [`AmmError::Overflow`] if the result exceeds 256 bits.
    pub fn checked_quo(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let scaled = U512::from(self.atoms)
            .checked_mul(ONE_U512)
            .and_then(|v| v.checked_mul(ONE_U512))
            .ok_or(AmmError::Overflow("decimal division overflow"))?;
        let wide = div_rounded(scaled, U512::from(other.atoms), Rounding::Down)?;
        let chopped = div_rounded(wide, ONE_U512, Rounding::HalfEven)?;
        let atoms = U256::checked_from_uint(chopped)
            .ok_or(AmmError::Overflow("decimal division overflow"))?;
        Ok(Self::signed(self.negative != other.negative, atoms))
    }

    /// Exact multiplication by an integer.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    pub fn mul_int(&self, n: Amount) -> Result<Self> {
        let atoms = self
            .atoms
            .checked_mul(U256::from(n.unsigned_abs()))
            .ok_or(AmmError::Overflow("decimal integer multiplication overflow"))?;
        Ok(Self::signed(self.negative != n.is_negative(), atoms))
    }

    /// Division by an integer, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `n` is zero.
    pub fn quo_int(&self, n: Amount) -> Result<Self> {
        if n.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let atoms = self
            .atoms
            .checked_div(U256::from(n.unsigned_abs()))
            .ok_or(AmmError::DivisionByZero)?;
        Ok(Self::signed(self.negative != n.is_negative(), atoms))
    }

    /// Integer power by repeated squaring; every step rounds like
    /// [`checked_mul`](Self::checked_mul).  `x^0` is `1`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if an intermediate square overflows.
    pub fn power(&self, n: u64) -> Result<Self> {
        if n == 0 {
            return Ok(Self::ONE);
        }
        let mut base = *self;
        let mut acc = Self::ONE;
        let mut i = n;
        while i > 1 {
            if i % 2 != 0 {
                acc = acc.checked_mul(&base)?;
            }
            i /= 2;
            base = base.checked_mul(&base)?;
        }
        base.checked_mul(&acc)
    }

    /// Drops the fractional part, keeping the sign.
    #[must_use]
    pub fn trunc(&self) -> Self {
        let frac = self.atoms % ONE_U256;
        Self::signed(self.negative, self.atoms - frac)
    }

    /// Integer part as an [`Amount`], truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the integer part exceeds `i128`.
    pub fn truncate_int(&self) -> Result<Amount> {
        let whole = self.atoms / ONE_U256;
        let whole = u128::try_from(whole)
            .ok()
            .and_then(|w| i128::try_from(w).ok())
            .ok_or(AmmError::Overflow("decimal integer part exceeds i128"))?;
        Ok(Amount::new(if self.negative { -whole } else { whole }))
    }

    /// Integer part as a `u64`, for exponents.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the value is negative or too large.
    pub fn truncate_u64(&self) -> Result<u64> {
        if self.negative {
            return Err(AmmError::Overflow("negative value has no u64 integer part"));
        }
        u64::try_from(self.atoms / ONE_U256)
            .map_err(|_| AmmError::Overflow("decimal integer part exceeds u64"))
    }
}

impl Ord for Dec {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.atoms.cmp(&other.atoms),
            (true, true) => other.atoms.cmp(&self.atoms),
        }
    }
}

impl PartialOrd for Dec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for Dec {
    type Output = Self;

    fn neg(self) -> Self {
        Self::signed(!self.negative, self.atoms)
    }
}

impl From<Amount> for Dec {
    fn from(amount: Amount) -> Self {
        Self::from_amount(amount)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.atoms / ONE_U256;
        let frac = u64::try_from(self.atoms % ONE_U256).map_err(|_| fmt::Error)?;
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{sign}{whole}.{frac:018}")
    }
}

impl FromStr for Dec {
    type Err = AmmError;

    /// Parses `[-]digits[.digits]` with at most 18 fractional digits.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        const MALFORMED: AmmError = AmmError::InvalidQuantity("malformed decimal");
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        let is_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) {
            return Err(MALFORMED);
        }
        if body.contains('.') && frac.is_empty() {
            return Err(MALFORMED);
        }
        if frac.len() > PRECISION as usize {
            return Err(AmmError::InvalidQuantity("decimal has more than 18 fractional digits"));
        }
        let whole = U256::from_str_radix(whole, 10).map_err(|_| MALFORMED)?;
        let frac_atoms = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<18}");
            padded.parse::<u64>().map_err(|_| MALFORMED)?
        };
        let atoms = whole
            .checked_mul(ONE_U256)
            .and_then(|w| w.checked_add(U256::from(frac_atoms)))
            .ok_or(AmmError::Overflow("decimal literal overflow"))?;
        Ok(Self::signed(negative, atoms))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
