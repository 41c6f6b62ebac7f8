//! Ledger abstraction: the external store of account balances.
//!
//! The engine never owns token balances.  Everything that moves value,
//! whether reserve tokens between a sender and a pool account or pool
//! shares being minted and burned, goes through a [`LedgerAdapter`]
//! injected into
//! [`LiquidityOperations`](crate::operations::LiquidityOperations).
//!
//! # Atomicity Contract
//!
//! Each method either applies fully or returns an error without changing
//! any balance.  The operations layer additionally preflights every debit
//! of a multi-step plan before issuing the first call, so an
//! implementation that honours the per-call contract yields all-or-nothing
//! operations.

use crate::domain::{Address, Amount, Coins};
use crate::error::AmmError;

/// Balance store consumed by the liquidity operations.
///
/// # Implementors
///
/// - [`InMemoryLedger`](crate::ledger::InMemoryLedger) — `BTreeMap`-backed
///   reference ledger used in tests and simulations.
///
/// # Errors
///
/// Debiting methods return [`AmmError::InsufficientFunds`] when the
/// debited account holds less than requested.
pub trait LedgerAdapter {
    /// Balance of `denom` held by `account`; zero when absent.
    fn balance(&self, account: &Address, denom: &str) -> Amount;

    /// Every non-zero balance held by `account`.
    fn all_balances(&self, account: &Address) -> Coins;

    /// Moves `coins` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientFunds`] if `from` cannot cover a coin.
    /// - [`AmmError::Overflow`] if a credited balance overflows.
    fn transfer(&mut self, from: &Address, to: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Creates `coins` and credits them to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a balance or supply overflows.
    fn mint(&mut self, to: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Destroys `coins` held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientFunds`] if `from` cannot cover a
    /// coin.
    fn burn(&mut self, from: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Moves `coins` from `from` to the fee destination.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientFunds`] if `from` cannot cover a
    /// coin.
    fn deposit_to_fee_sink(&mut self, from: &Address, coins: &Coins) -> Result<(), AmmError>;
}
