//! Ordered ledger instructions built before anything is executed.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, Coins};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::LedgerAdapter;

/// A single ledger call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LedgerOp {
    Transfer {
        from: Address,
        to: Address,
        coins: Coins,
    },
    Mint {
        to: Address,
        coins: Coins,
    },
    Burn {
        from: Address,
        coins: Coins,
    },
    FeeSink {
        from: Address,
        coins: Coins,
    },
}

/// The ledger side of one operation, in execution order.
///
/// [`preflight`](Self::preflight) replays the plan against current
/// balances, crediting earlier steps before later debits, and fails on the
/// first debit that would go negative.  Only a plan that passed preflight
/// is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EffectPlan {
    ops: Vec<LedgerOp>,
}

impl EffectPlan {
    pub(crate) const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub(crate) fn transfer(&mut self, from: &Address, to: &Address, coins: Coins) {
        if !coins.is_empty() {
            self.ops.push(LedgerOp::Transfer {
                from: from.clone(),
                to: to.clone(),
                coins,
            });
        }
    }

    pub(crate) fn mint(&mut self, to: &Address, coins: Coins) {
        if !coins.is_empty() {
            self.ops.push(LedgerOp::Mint {
                to: to.clone(),
                coins,
            });
        }
    }

    pub(crate) fn burn(&mut self, from: &Address, coins: Coins) {
        if !coins.is_empty() {
            self.ops.push(LedgerOp::Burn {
                from: from.clone(),
                coins,
            });
        }
    }

    pub(crate) fn fee_sink(&mut self, from: &Address, coins: Coins) {
        if !coins.is_empty() {
            self.ops.push(LedgerOp::FeeSink {
                from: from.clone(),
                coins,
            });
        }
    }

    /// Checks that every debit is covered at the point it executes.
    pub(crate) fn preflight<L: LedgerAdapter>(&self, ledger: &L) -> Result<()> {
        let mut projected: BTreeMap<(Address, String), Amount> = BTreeMap::new();
        for op in &self.ops {
            match op {
                LedgerOp::Transfer { from, to, coins } => {
                    debit(&mut projected, ledger, from, coins)?;
                    credit(&mut projected, ledger, to, coins)?;
                }
                LedgerOp::Mint { to, coins } => credit(&mut projected, ledger, to, coins)?,
                LedgerOp::Burn { from, coins } | LedgerOp::FeeSink { from, coins } => {
                    debit(&mut projected, ledger, from, coins)?;
                }
            }
        }
        Ok(())
    }

    /// Issues the ledger calls in order.
    pub(crate) fn execute<L: LedgerAdapter>(self, ledger: &mut L) -> Result<()> {
        for op in self.ops {
            match op {
                LedgerOp::Transfer { from, to, coins } => ledger.transfer(&from, &to, &coins)?,
                LedgerOp::Mint { to, coins } => ledger.mint(&to, &coins)?,
                LedgerOp::Burn { from, coins } => ledger.burn(&from, &coins)?,
                LedgerOp::FeeSink { from, coins } => ledger.deposit_to_fee_sink(&from, &coins)?,
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn ops(&self) -> &[LedgerOp] {
        &self.ops
    }
}

fn projected_balance<L: LedgerAdapter>(
    projected: &BTreeMap<(Address, String), Amount>,
    ledger: &L,
    account: &Address,
    denom: &str,
) -> Amount {
    projected
        .get(&(account.clone(), denom.to_owned()))
        .copied()
        .unwrap_or_else(|| ledger.balance(account, denom))
}

fn debit<L: LedgerAdapter>(
    projected: &mut BTreeMap<(Address, String), Amount>,
    ledger: &L,
    account: &Address,
    coins: &Coins,
) -> Result<()> {
    for (denom, amount) in coins.iter() {
        let available = projected_balance(projected, ledger, account, denom);
        if available < amount {
            return Err(AmmError::InsufficientFunds {
                account: account.clone(),
                denom: denom.to_owned(),
                required: amount,
                available,
            });
        }
        let next = available.safe_sub(&amount)?;
        projected.insert((account.clone(), denom.to_owned()), next);
    }
    Ok(())
}

fn credit<L: LedgerAdapter>(
    projected: &mut BTreeMap<(Address, String), Amount>,
    ledger: &L,
    account: &Address,
    coins: &Coins,
) -> Result<()> {
    for (denom, amount) in coins.iter() {
        let next = projected_balance(projected, ledger, account, denom).safe_add(&amount)?;
        projected.insert((account.clone(), denom.to_owned()), next);
    }
    Ok(())
}
