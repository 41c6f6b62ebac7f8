//! Unified error types for the weighted pool engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every variant belongs to exactly one [`ErrorKind`], which
//! is what callers (and the tests) match on when they only care about the
//! class of failure:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`ErrorKind::Validation`] | malformed assets, fees, quantities, inactive pool |
//! | [`ErrorKind::InsufficientFunds`] | an account cannot cover a debit |
//! | [`ErrorKind::SlippageExceeded`] | a caller-supplied min/max bound is violated |
//! | [`ErrorKind::NotFound`] | unknown pool, or sender holds none of its shares |
//! | [`ErrorKind::Arithmetic`] | overflow, underflow, division by zero, pow domain |
//!
//! Errors are never retried or softened internally.

use thiserror::Error;

use crate::domain::{Address, Amount, Timestamp};

/// Coarse classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input or a request the pool cannot accept.
    Validation,
    /// An account lacks funds for a transfer, burn or fee.
    InsufficientFunds,
    /// A computed amount violates a caller-supplied bound.
    SlippageExceeded,
    /// A referenced pool (or the sender's shares in it) does not exist.
    NotFound,
    /// Fixed-point arithmetic failed.
    Arithmetic,
}

/// Error type for every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Pool assets or pool-level configuration are malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An asset weight is zero or negative.
    #[error("invalid weight: {0}")]
    InvalidWeight(&'static str),

    /// A fee is outside `[0, 1)`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A requested share or token quantity is unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A denom is unknown to the pool, repeated, or malformed.
    #[error("invalid token {denom}: {reason}")]
    InvalidToken {
        /// Offending denom.
        denom: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A future-governor descriptor could not be parsed.
    #[error("invalid future governor: {0:?}")]
    InvalidGovernor(String),

    /// The pool has not reached its start time yet.
    #[error("pool {pool_id} is not active until {starts_at}")]
    PoolInactive {
        /// Pool identifier.
        pool_id: u64,
        /// First timestamp at which joins and exits are accepted.
        starts_at: Timestamp,
    },

    /// An account holds less of a denom than a debit requires.
    #[error("insufficient funds: {account} holds {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        /// Debited account.
        account: Address,
        /// Denom being debited.
        denom: String,
        /// Amount the operation needs.
        required: Amount,
        /// Amount the account holds.
        available: Amount,
    },

    /// A computed amount crossed a caller-supplied bound.
    #[error("slippage exceeded: {what} for {denom} is {actual}, limit {limit}")]
    SlippageExceeded {
        /// Which bound was checked.
        what: &'static str,
        /// Denom of the bounded quantity.
        denom: String,
        /// Caller-supplied bound.
        limit: Amount,
        /// Computed quantity.
        actual: Amount,
    },

    /// No pool with the given identifier.
    #[error("pool {0} not found")]
    PoolNotFound(u64),

    /// The sender holds no shares of the pool.
    #[error("{account} holds no shares of pool {pool_id}")]
    NoSharesHeld {
        /// Sender account.
        account: Address,
        /// Pool identifier.
        pool_id: u64,
    },

    /// Arithmetic result is not representable.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic result went below the representable range.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Exponentiation base outside `(0, 2)` or a negative exponent.
    #[error("power input out of domain: {0}")]
    PowOutOfDomain(&'static str),
}

impl AmmError {
    /// Returns the [`ErrorKind`] this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_)
            | Self::InvalidWeight(_)
            | Self::InvalidFee(_)
            | Self::InvalidQuantity(_)
            | Self::InvalidToken { .. }
            | Self::InvalidGovernor(_)
            | Self::Config(_)
            | Self::PoolInactive { .. } => ErrorKind::Validation,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::SlippageExceeded { .. } => ErrorKind::SlippageExceeded,
            Self::PoolNotFound(_) | Self::NoSharesHeld { .. } => ErrorKind::NotFound,
            Self::Overflow(_)
            | Self::Underflow(_)
            | Self::DivisionByZero
            | Self::PowOutOfDomain(_) => ErrorKind::Arithmetic,
        }
    }

    pub(crate) fn invalid_token(denom: &str, reason: &'static str) -> Self {
        Self::InvalidToken {
            denom: denom.to_owned(),
            reason,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
