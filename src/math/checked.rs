//! Checked arithmetic for integer amounts and wide intermediate products.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! [`mul_div`] computes `a * b / c` through a 512-bit intermediate so the
//! product never overflows before the division, with an explicit
//! [`Rounding`] rule applied to the remainder.
//!
//! # Examples
//!
//! ```
//! use weighted_pools::domain::{Amount, Rounding};
//! use weighted_pools::math::{mul_div, CheckedArithmetic};
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert!(a.safe_add(&b).is_ok());
//!
//! // ceil(5_000_000 * 1 / 1_000) = 5_000
//! let r = mul_div(Amount::new(5_000_000), Amount::new(1), Amount::new(1_000), Rounding::Up);
//! assert_eq!(r, Ok(Amount::new(5_000)));
//! ```

use alloy_primitives::U512;

use crate::domain::{Amount, Rounding};
use crate::error::{AmmError, Result};

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns [`Result<Self, AmmError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction that must stay non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        match self.checked_sub(other) {
            Some(v) if !v.is_negative() => Ok(v),
            _ => Err(AmmError::Underflow("amount subtraction underflow")),
        }
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self> {
        self.checked_mul(other)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self> {
        if other.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        self.checked_div(other, rounding)
            .ok_or(AmmError::Overflow("amount division overflow"))
    }
}

/// Divides `num` by `den`, rounding the discarded remainder per `rounding`.
///
/// Operands are magnitudes; the caller owns the sign.
pub(crate) fn div_rounded(num: U512, den: U512, rounding: Rounding) -> Result<U512> {
    if den.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let (q, r) = num.div_rem(den);
    // r < den, so den - r cannot underflow; r vs den - r is 2r vs den
    let vs_half = r.cmp(&(den - r));
    if !rounding.bumps(q.bit(0), vs_half, r.is_zero()) {
        return Ok(q);
    }
    q.checked_add(U512::from(1u8))
        .ok_or(AmmError::Overflow("rounded quotient overflow"))
}

/// Computes `a * b / c` exactly, rounding once at the end.
///
/// All operands must be non-negative.
///
/// # Errors
///
/// - [`AmmError::Underflow`] if any operand is negative.
/// - [`AmmError::DivisionByZero`] if `c` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit an [`Amount`].
pub fn mul_div(a: Amount, b: Amount, c: Amount, rounding: Rounding) -> Result<Amount> {
    if a.is_negative() || b.is_negative() || c.is_negative() {
        return Err(AmmError::Underflow("mul_div operands must be non-negative"));
    }
    let product = U512::from(a.unsigned_abs())
        .checked_mul(U512::from(b.unsigned_abs()))
        .ok_or(AmmError::Overflow("mul_div product overflow"))?;
    let q = div_rounded(product, U512::from(c.unsigned_abs()), rounding)?;
    let q = u128::try_from(q).map_err(|_| AmmError::Overflow("mul_div result overflow"))?;
    i128::try_from(q)
        .map(Amount::new)
        .map_err(|_| AmmError::Overflow("mul_div result overflow"))
}
