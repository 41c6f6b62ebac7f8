//! Ledger account identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of the account that holds a pool's reserves.
const POOL_ACCOUNT_PREFIX: &str = "pool-account/";

/// An opaque ledger account identifier.
///
/// The engine never interprets addresses beyond equality and ordering;
/// the ledger adapter decides what a valid account is.  Pool reserve
/// accounts are derived deterministically from the pool id with
/// [`Address::for_pool`].
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::Address;
///
/// let pool = Address::for_pool(3);
/// assert_eq!(pool.as_str(), "pool-account/3");
/// assert_ne!(pool, Address::new("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps an account identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reserve account of the pool with the given id.
    #[must_use]
    pub fn for_pool(pool_id: u64) -> Self {
        Self(format!("{POOL_ACCOUNT_PREFIX}{pool_id}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for strings shaped like a bech32 account: a lowercase
    /// human-readable part, the `1` separator, and at least six characters
    /// of the bech32 data alphabet.
    ///
    /// Used to tell governor addresses apart from lock descriptors.
    #[must_use]
    pub fn is_bech32_like(value: &str) -> bool {
        const DATA_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";
        let Some(sep) = value.rfind('1') else {
            return false;
        };
        let (hrp, data) = value.split_at(sep);
        let data = data.get(1..).unwrap_or_default();
        !hrp.is_empty()
            && hrp.chars().all(|c| c.is_ascii_lowercase())
            && data.len() >= 6
            && data.chars().all(|c| DATA_CHARSET.contains(c))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
