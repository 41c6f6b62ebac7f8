//! Denominated amounts and canonical coin sets.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Maximum length of a denom string.
const MAX_DENOM_LEN: usize = 128;

/// Checks that `denom` is a well-formed asset identifier.
///
/// A denom starts with an ASCII letter, is 3 to 128 characters long, and
/// otherwise contains only ASCII alphanumerics and `/ : . _ -`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidToken`] describing the violated rule.
pub fn validate_denom(denom: &str) -> Result<()> {
    if denom.len() < 3 || denom.len() > MAX_DENOM_LEN {
        return Err(AmmError::invalid_token(denom, "denom must be 3-128 characters"));
    }
    let mut chars = denom.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(AmmError::invalid_token(denom, "denom must start with a letter"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')) {
        return Err(AmmError::invalid_token(denom, "denom contains an invalid character"));
    }
    Ok(())
}

/// An [`Amount`] of a single denom.
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::{Amount, Coin};
///
/// let c = Coin::new("foo", Amount::new(10_000));
/// assert_eq!(c.to_string(), "10000foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Asset identifier.
    pub denom: String,
    /// Quantity in the denom's smallest unit.
    pub amount: Amount,
}

impl Coin {
    /// Creates a coin.  No validation happens here; see [`Coins::try_from_coins`].
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A canonical set of coins: sorted by denom, one entry per denom, every
/// amount strictly positive.
///
/// Zero-amount entries are dropped on insertion, which keeps equality and
/// the [`Display`](fmt::Display) form (`"10000bar,10000foo"`) canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(BTreeMap<String, Amount>);

impl Coins {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a set from caller-supplied coins, rejecting malformed input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] for a malformed or repeated denom.
    /// - [`AmmError::InvalidQuantity`] for a zero or negative amount.
    pub fn try_from_coins(coins: impl IntoIterator<Item = Coin>) -> Result<Self> {
        let mut set = BTreeMap::new();
        for coin in coins {
            validate_denom(&coin.denom)?;
            if !coin.amount.is_positive() {
                return Err(AmmError::InvalidQuantity("coin amounts must be positive"));
            }
            if set.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(AmmError::invalid_token(&coin.denom, "duplicate denom"));
            }
        }
        Ok(Self(set))
    }

    /// Returns the amount held of `denom`, zero when absent.
    #[must_use]
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0.get(denom).copied().unwrap_or(Amount::ZERO)
    }

    /// Returns `true` if the set holds no coins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct denoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if `denom` has a positive amount.
    #[must_use]
    pub fn contains(&self, denom: &str) -> bool {
        self.0.contains_key(denom)
    }

    /// Iterates `(denom, amount)` in denom order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> + '_ {
        self.0.iter().map(|(d, a)| (d.as_str(), *a))
    }

    /// Iterates the denoms in order.
    pub fn denoms(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Adds `amount` of `denom`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `amount` is negative.
    /// - [`AmmError::Overflow`] if the running total overflows.
    pub fn add_amount(&mut self, denom: &str, amount: Amount) -> Result<()> {
        if amount.is_negative() {
            return Err(AmmError::InvalidQuantity("cannot add a negative amount"));
        }
        if amount.is_zero() {
            return Ok(());
        }
        let next = self.amount_of(denom).safe_add(&amount)?;
        self.0.insert(denom.to_owned(), next);
        Ok(())
    }

    /// Subtracts `amount` of `denom`, removing the entry when it hits zero.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `amount` is negative.
    /// - [`AmmError::Underflow`] if the set holds less than `amount`.
    pub fn sub_amount(&mut self, denom: &str, amount: Amount) -> Result<()> {
        if amount.is_negative() {
            return Err(AmmError::InvalidQuantity("cannot subtract a negative amount"));
        }
        if amount.is_zero() {
            return Ok(());
        }
        let next = self.amount_of(denom).safe_sub(&amount)?;
        if next.is_zero() {
            self.0.remove(denom);
        } else {
            self.0.insert(denom.to_owned(), next);
        }
        Ok(())
    }

    /// Adds every coin of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if any total overflows.
    pub fn add_all(&mut self, other: &Self) -> Result<()> {
        for (denom, amount) in other.iter() {
            self.add_amount(denom, amount)?;
        }
        Ok(())
    }

    /// Returns the coins as a `Vec<Coin>` in denom order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Coin> {
        self.iter().map(|(d, a)| Coin::new(d, a)).collect()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denom, amount) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{amount}{denom}")?;
            first = false;
        }
        Ok(())
    }
}
