//! `BTreeMap`-backed reference ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, Coins};
use crate::error::{AmmError, Result};
use crate::traits::LedgerAdapter;

/// Deterministic in-memory [`LedgerAdapter`].
///
/// Tracks per-account balances, the total supply of every denom, and the
/// coins collected by the fee sink.  Every call computes the full set of
/// new balances before committing any of them, so a failed call leaves
/// the ledger untouched.
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::{Address, Amount, Coin, Coins};
/// use weighted_pools::ledger::InMemoryLedger;
/// use weighted_pools::traits::LedgerAdapter;
///
/// let alice = Address::new("alice");
/// let mut ledger = InMemoryLedger::new();
/// let Ok(coins) = Coins::try_from_coins([Coin::new("foo", Amount::new(10))]) else {
///     panic!()
/// };
/// assert!(ledger.fund(&alice, &coins).is_ok());
/// assert_eq!(ledger.balance(&alice, "foo"), Amount::new(10));
/// assert_eq!(ledger.supply_of("foo"), Amount::new(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: BTreeMap<Address, Coins>,
    supply: Coins,
    fee_sink: Coins,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
            supply: Coins::new(),
            fee_sink: Coins::new(),
        }
    }

    /// Credits freshly issued `coins` to `account`; a genesis helper.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a balance or supply overflows.
    pub fn fund(&mut self, account: &Address, coins: &Coins) -> Result<()> {
        self.mint(account, coins)
    }

    /// Coins collected by the fee sink so far.
    #[must_use]
    pub const fn fee_sink(&self) -> &Coins {
        &self.fee_sink
    }

    /// Total outstanding supply of `denom`, fee sink included.
    #[must_use]
    pub fn supply_of(&self, denom: &str) -> Amount {
        self.supply.amount_of(denom)
    }

    fn debited(&self, account: &Address, coins: &Coins) -> Result<Coins> {
        let mut next = self.all_balances(account);
        for (denom, amount) in coins.iter() {
            let available = next.amount_of(denom);
            if available < amount {
                return Err(AmmError::InsufficientFunds {
                    account: account.clone(),
                    denom: denom.to_owned(),
                    required: amount,
                    available,
                });
            }
            next.sub_amount(denom, amount)?;
        }
        Ok(next)
    }

    fn credited(&self, account: &Address, coins: &Coins) -> Result<Coins> {
        let mut next = self.all_balances(account);
        next.add_all(coins)?;
        Ok(next)
    }

    fn store(&mut self, account: &Address, coins: Coins) {
        if coins.is_empty() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), coins);
        }
    }
}

impl LedgerAdapter for InMemoryLedger {
    fn balance(&self, account: &Address, denom: &str) -> Amount {
        self.balances
            .get(account)
            .map_or(Amount::ZERO, |coins| coins.amount_of(denom))
    }

    fn all_balances(&self, account: &Address) -> Coins {
        self.balances.get(account).cloned().unwrap_or_default()
    }

    fn transfer(&mut self, from: &Address, to: &Address, coins: &Coins) -> Result<()> {
        if from == to {
            self.debited(from, coins)?;
            return Ok(());
        }
        let sender = self.debited(from, coins)?;
        let recipient = self.credited(to, coins)?;
        self.store(from, sender);
        self.store(to, recipient);
        Ok(())
    }

    fn mint(&mut self, to: &Address, coins: &Coins) -> Result<()> {
        let recipient = self.credited(to, coins)?;
        let mut supply = self.supply.clone();
        supply.add_all(coins)?;
        self.store(to, recipient);
        self.supply = supply;
        Ok(())
    }

    fn burn(&mut self, from: &Address, coins: &Coins) -> Result<()> {
        let holder = self.debited(from, coins)?;
        let mut supply = self.supply.clone();
        for (denom, amount) in coins.iter() {
            supply.sub_amount(denom, amount)?;
        }
        self.store(from, holder);
        self.supply = supply;
        Ok(())
    }

    fn deposit_to_fee_sink(&mut self, from: &Address, coins: &Coins) -> Result<()> {
        let sender = self.debited(from, coins)?;
        let mut sink = self.fee_sink.clone();
        sink.add_all(coins)?;
        self.store(from, sender);
        self.fee_sink = sink;
        Ok(())
    }
}
