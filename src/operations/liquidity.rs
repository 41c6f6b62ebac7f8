//! The liquidity lifecycle operations: pool creation plus every join and
//! exit shape.

use tracing::{debug, info, warn};

use super::plan::EffectPlan;
use crate::config::{ModuleParams, PoolParams};
use crate::domain::{
    Address, Amount, Coin, Coins, FutureGovernor, LiquidityReceipt, PoolAsset, Timestamp,
};
use crate::error::{AmmError, Result};
use crate::math::{CheckedArithmetic, Dec};
use crate::pools::invariant::{
    proportional_amounts_for_withdrawal, proportional_shares_for_deposit,
    single_asset_exit_amount, single_asset_exit_shares_for_exact_out, single_asset_join_shares,
    single_asset_join_tokens_for_exact_shares, spot_price,
};
use crate::pools::{Pool, INIT_POOL_SHARES_SUPPLY};
use crate::registry::PoolRegistry;
use crate::traits::LedgerAdapter;

/// Entry point for creating pools and moving liquidity in and out of them.
///
/// Owns the [`PoolRegistry`], the injected ledger and the module
/// parameters.  Every method takes the caller's current time, pokes the
/// target pool with it, and is all-or-nothing: all amounts and bounds are
/// checked and the ledger plan is preflighted before the first balance
/// changes.
///
/// # Examples
///
/// ```
/// use weighted_pools::config::{ModuleParams, PoolParams};
/// use weighted_pools::domain::{
///     Address, Amount, Coin, Coins, FutureGovernor, PoolAsset, Timestamp, Weight,
/// };
/// use weighted_pools::ledger::InMemoryLedger;
/// use weighted_pools::operations::LiquidityOperations;
///
/// let alice = Address::new("alice");
/// let mut ledger = InMemoryLedger::new();
/// let Ok(funds) = Coins::try_from_coins([
///     Coin::new("foo", Amount::new(10_000)),
///     Coin::new("bar", Amount::new(10_000)),
/// ]) else { panic!() };
/// ledger.fund(&alice, &funds).expect("funded");
///
/// let mut ops = LiquidityOperations::new(ledger, ModuleParams::default());
/// let pool_id = ops
///     .create_pool(
///         &alice,
///         vec![
///             PoolAsset::new("foo", Amount::new(10_000), Weight::new(1)),
///             PoolAsset::new("bar", Amount::new(10_000), Weight::new(1)),
///         ],
///         PoolParams::zero_fee(),
///         FutureGovernor::None,
///         None,
///         Timestamp::from_secs(0),
///     )
///     .expect("pool created");
/// assert_eq!(pool_id, 1);
/// ```
#[derive(Debug, Clone)]
pub struct LiquidityOperations<L: LedgerAdapter> {
    registry: PoolRegistry,
    ledger: L,
    params: ModuleParams,
}

impl<L: LedgerAdapter> LiquidityOperations<L> {
    /// Creates operations over an empty registry.
    pub fn new(ledger: L, params: ModuleParams) -> Self {
        Self::with_registry(PoolRegistry::new(), ledger, params)
    }

    /// Creates operations over an existing registry.
    pub const fn with_registry(registry: PoolRegistry, ledger: L, params: ModuleParams) -> Self {
        Self {
            registry,
            ledger,
            params,
        }
    }

    /// The pool registry.
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. to schedule changes.
    pub fn registry_mut(&mut self) -> &mut PoolRegistry {
        &mut self.registry
    }

    /// The injected ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Module parameters in force.
    pub const fn params(&self) -> &ModuleParams {
        &self.params
    }

    /// Replaces the module parameters.
    pub fn set_params(&mut self, params: ModuleParams) {
        self.params = params;
    }

    /// Splits the operations back into registry, ledger and parameters.
    pub fn into_parts(self) -> (PoolRegistry, L, ModuleParams) {
        (self.registry, self.ledger, self.params)
    }

    /// Price of one unit of `base` in `quote` in pool `pool_id` at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if the pool does not exist.
    /// - [`AmmError::InvalidToken`] if either denom is not in the pool.
    pub fn spot_price(
        &mut self,
        pool_id: u64,
        base: &str,
        quote: &str,
        now: Timestamp,
    ) -> Result<Dec> {
        let pool = self.registry.get_pool_and_poke(pool_id, now)?;
        spot_price(&pool, base, quote)
    }

    // -- create -----------------------------------------------------------------

    /// Creates a pool funded by `sender`.
    ///
    /// Charges the pool-creation fee to the fee sink, moves `assets` from
    /// the sender to the pool account, and mints
    /// [`INIT_POOL_SHARES_SUPPLY`] shares to the sender.  Returns the new
    /// pool's id.
    ///
    /// # Errors
    ///
    /// - Validation errors from [`Pool::new`] for malformed assets or
    ///   parameters.
    /// - [`AmmError::InsufficientFunds`] if the sender cannot cover the
    ///   creation fee plus the initial deposit.
    /// - [`AmmError::Overflow`] if pool ids are exhausted.
    pub fn create_pool(
        &mut self,
        sender: &Address,
        assets: Vec<PoolAsset>,
        params: PoolParams,
        future_governor: FutureGovernor,
        start_time: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<u64> {
        let pool_id = self.registry.next_pool_id();
        if pool_id.checked_add(1).is_none() {
            return Err(AmmError::Overflow("pool id counter exhausted"));
        }
        let pool = Pool::new(pool_id, assets, params, future_governor, now, start_time)?;
        let deposit = pool.balances()?;
        let shares = single_coin(&pool.share_denom(), INIT_POOL_SHARES_SUPPLY)?;

        let mut plan = EffectPlan::new();
        plan.fee_sink(sender, self.params.pool_creation_fee().clone());
        plan.transfer(sender, pool.address(), deposit.clone());
        plan.mint(sender, shares);
        plan.preflight(&self.ledger)?;
        plan.execute(&mut self.ledger)?;

        let active = pool.is_active();
        let id = self.registry.create_pool(pool)?;
        info!(pool_id = id, %sender, %deposit, active, "created pool");
        Ok(id)
    }

    // -- proportional -----------------------------------------------------------

    /// Mints exactly `share_out` shares for a proportional deposit.
    ///
    /// Every capped denom in `token_in_maxs` bounds the required deposit
    /// (inclusive); uncapped pool denoms are unbounded.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `share_out` is not positive.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::InvalidToken`] if a cap names a denom not in the pool.
    /// - [`AmmError::SlippageExceeded`] if a required amount exceeds its cap.
    /// - [`AmmError::InsufficientFunds`] if the sender cannot pay.
    pub fn join_pool_no_swap(
        &mut self,
        sender: &Address,
        pool_id: u64,
        share_out: Amount,
        token_in_maxs: &Coins,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if !share_out.is_positive() {
            return Err(AmmError::InvalidQuantity("share out amount must be positive"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        for denom in token_in_maxs.denoms() {
            pool.asset(denom)?;
        }
        let required = proportional_shares_for_deposit(&pool, share_out)?;
        debug!(pool_id, %share_out, %required, "proportional join");
        for (denom, max) in token_in_maxs.iter() {
            let actual = required.amount_of(denom);
            if actual > max {
                return Err(slippage("token in", denom, max, actual));
            }
        }
        pool.add_liquidity(&required, share_out)?;

        let mut plan = EffectPlan::new();
        plan.transfer(sender, pool.address(), required.clone());
        plan.mint(sender, single_coin(&pool.share_denom(), share_out)?);
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_out, tokens_in = %required, "joined pool");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_out,
            tokens: required,
        })
    }

    /// Burns `share_in` shares for a proportional withdrawal.
    ///
    /// Every denom in `token_out_mins` sets a floor (inclusive) on its
    /// refund.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `share_in` is not positive, is
    ///   the whole supply, or would drain an asset.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::NoSharesHeld`] / [`AmmError::InsufficientFunds`] if the
    ///   sender holds no or too few shares.
    /// - [`AmmError::InvalidToken`] if a floor names a denom not in the pool.
    /// - [`AmmError::SlippageExceeded`] if a refund falls below its floor.
    pub fn exit_pool(
        &mut self,
        sender: &Address,
        pool_id: u64,
        share_in: Amount,
        token_out_mins: &Coins,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if !share_in.is_positive() {
            return Err(AmmError::InvalidQuantity("share in amount must be positive"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        self.ensure_shares(sender, &pool, share_in)?;
        for denom in token_out_mins.denoms() {
            pool.asset(denom)?;
        }
        let refunds = proportional_amounts_for_withdrawal(&pool, share_in)?;
        debug!(pool_id, %share_in, %refunds, "proportional exit");
        for (denom, min) in token_out_mins.iter() {
            let actual = refunds.amount_of(denom);
            if actual < min {
                return Err(slippage("token out", denom, min, actual));
            }
        }
        pool.remove_liquidity(&refunds, share_in)?;

        let mut plan = EffectPlan::new();
        plan.burn(sender, single_coin(&pool.share_denom(), share_in)?);
        plan.transfer(pool.address(), sender, refunds.clone());
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_in, tokens_out = %refunds, "exited pool");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_in,
            tokens: refunds,
        })
    }

    // -- single asset -----------------------------------------------------------

    /// Deposits `tokens_in` and mints whatever shares they are worth.
    ///
    /// Each denom is joined in turn as a single-asset deposit, with the
    /// pool's balances and supply updated between denoms.  The summed
    /// shares must reach `share_out_min` (inclusive).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `tokens_in` is empty,
    ///   `share_out_min` is negative, or no shares would be minted.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::InvalidToken`] if a denom is not in the pool.
    /// - [`AmmError::PowOutOfDomain`] if a deposit is at least the pool's
    ///   balance of that asset.
    /// - [`AmmError::SlippageExceeded`] if the shares fall short.
    /// - [`AmmError::InsufficientFunds`] if the sender cannot pay.
    pub fn join_swap_exact_amount_in(
        &mut self,
        sender: &Address,
        pool_id: u64,
        tokens_in: &Coins,
        share_out_min: Amount,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if tokens_in.is_empty() {
            return Err(AmmError::InvalidQuantity("tokens in must not be empty"));
        }
        if share_out_min.is_negative() {
            return Err(AmmError::InvalidQuantity("share out minimum must not be negative"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        let mut share_out = Amount::ZERO;
        for (denom, amount) in tokens_in.iter() {
            let (index, _) = pool.asset(denom)?;
            let shares = single_asset_join_shares(&pool, index, amount)?;
            debug!(pool_id, denom, %amount, %shares, "single-asset join step");
            pool.add_liquidity(&single_coin(denom, amount)?, shares)?;
            share_out = share_out.safe_add(&shares)?;
        }
        if !share_out.is_positive() {
            return Err(AmmError::InvalidQuantity("token in amount too small"));
        }
        if share_out < share_out_min {
            return Err(slippage(
                "share out",
                &pool.share_denom(),
                share_out_min,
                share_out,
            ));
        }

        let mut plan = EffectPlan::new();
        plan.transfer(sender, pool.address(), tokens_in.clone());
        plan.mint(sender, single_coin(&pool.share_denom(), share_out)?);
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_out, %tokens_in, "joined pool with single assets");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_out,
            tokens: tokens_in.clone(),
        })
    }

    /// Mints exactly `share_out` shares for a deposit of a single asset.
    ///
    /// The required deposit must not exceed `token_in_max` (inclusive).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `share_out` is not positive or
    ///   `token_in_max` is negative.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::InvalidToken`] if `token_in_denom` is not in the pool.
    /// - [`AmmError::PowOutOfDomain`] if `share_out` is at least the supply.
    /// - [`AmmError::SlippageExceeded`] if the deposit exceeds the cap.
    /// - [`AmmError::InsufficientFunds`] if the sender cannot pay.
    pub fn join_swap_share_amount_out(
        &mut self,
        sender: &Address,
        pool_id: u64,
        token_in_denom: &str,
        share_out: Amount,
        token_in_max: Amount,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if !share_out.is_positive() {
            return Err(AmmError::InvalidQuantity("share out amount must be positive"));
        }
        if token_in_max.is_negative() {
            return Err(AmmError::InvalidQuantity("token in maximum must not be negative"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        let (index, _) = pool.asset(token_in_denom)?;
        let amount_in = single_asset_join_tokens_for_exact_shares(&pool, index, share_out)?;
        debug!(pool_id, token_in_denom, %share_out, %amount_in, "exact-shares join");
        if !amount_in.is_positive() {
            return Err(AmmError::InvalidQuantity("share out amount too small"));
        }
        if amount_in > token_in_max {
            return Err(slippage("token in", token_in_denom, token_in_max, amount_in));
        }
        let tokens_in = single_coin(token_in_denom, amount_in)?;
        pool.add_liquidity(&tokens_in, share_out)?;

        let mut plan = EffectPlan::new();
        plan.transfer(sender, pool.address(), tokens_in.clone());
        plan.mint(sender, single_coin(&pool.share_denom(), share_out)?);
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_out, %tokens_in, "joined pool for exact shares");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_out,
            tokens: tokens_in,
        })
    }

    /// Burns `share_in` shares and withdraws a single asset.
    ///
    /// The payout must reach `token_out_min` (inclusive).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `share_in` is not positive,
    ///   `token_out_min` is negative, or the payout rounds to zero or would
    ///   drain the asset.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::NoSharesHeld`] / [`AmmError::InsufficientFunds`].
    /// - [`AmmError::InvalidToken`] if `token_out_denom` is not in the pool.
    /// - [`AmmError::SlippageExceeded`] if the payout falls short.
    pub fn exit_swap_share_amount_in(
        &mut self,
        sender: &Address,
        pool_id: u64,
        token_out_denom: &str,
        share_in: Amount,
        token_out_min: Amount,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if !share_in.is_positive() {
            return Err(AmmError::InvalidQuantity("share in amount must be positive"));
        }
        if token_out_min.is_negative() {
            return Err(AmmError::InvalidQuantity("token out minimum must not be negative"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        self.ensure_shares(sender, &pool, share_in)?;
        let (index, _) = pool.asset(token_out_denom)?;
        let amount_out = single_asset_exit_amount(&pool, index, share_in)?;
        debug!(pool_id, token_out_denom, %share_in, %amount_out, "single-asset exit");
        if !amount_out.is_positive() {
            return Err(AmmError::InvalidQuantity("share in amount too small"));
        }
        if amount_out < token_out_min {
            return Err(slippage("token out", token_out_denom, token_out_min, amount_out));
        }
        let tokens_out = single_coin(token_out_denom, amount_out)?;
        pool.remove_liquidity(&tokens_out, share_in)?;

        let mut plan = EffectPlan::new();
        plan.burn(sender, single_coin(&pool.share_denom(), share_in)?);
        plan.transfer(pool.address(), sender, tokens_out.clone());
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_in, %tokens_out, "exited pool to single asset");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_in,
            tokens: tokens_out,
        })
    }

    /// Withdraws exactly `token_out`, burning the shares it costs.
    ///
    /// The burned shares must not exceed `share_in_max` (inclusive).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if the amount is not positive,
    ///   `share_in_max` is negative, or the withdrawal would drain the
    ///   asset.
    /// - [`AmmError::PoolNotFound`] / [`AmmError::PoolInactive`].
    /// - [`AmmError::NoSharesHeld`] / [`AmmError::InsufficientFunds`].
    /// - [`AmmError::InvalidToken`] if the denom is not in the pool.
    /// - [`AmmError::SlippageExceeded`] if the shares exceed the cap.
    pub fn exit_swap_exact_amount_out(
        &mut self,
        sender: &Address,
        pool_id: u64,
        token_out: &Coin,
        share_in_max: Amount,
        now: Timestamp,
    ) -> Result<LiquidityReceipt> {
        if !token_out.amount.is_positive() {
            return Err(AmmError::InvalidQuantity("token out amount must be positive"));
        }
        if share_in_max.is_negative() {
            return Err(AmmError::InvalidQuantity("share in maximum must not be negative"));
        }
        let mut pool = self.active_pool(pool_id, now)?;
        self.ensure_shares(sender, &pool, Amount::ZERO)?;
        let (index, _) = pool.asset(&token_out.denom)?;
        let share_in = single_asset_exit_shares_for_exact_out(&pool, index, token_out.amount)?;
        debug!(pool_id, %token_out, %share_in, "exact-out exit");
        if share_in > share_in_max {
            return Err(slippage(
                "share in",
                &pool.share_denom(),
                share_in_max,
                share_in,
            ));
        }
        self.ensure_shares(sender, &pool, share_in)?;
        let tokens_out = single_coin(&token_out.denom, token_out.amount)?;
        pool.remove_liquidity(&tokens_out, share_in)?;

        let mut plan = EffectPlan::new();
        plan.burn(sender, single_coin(&pool.share_denom(), share_in)?);
        plan.transfer(pool.address(), sender, tokens_out.clone());
        self.commit(plan, pool)?;

        info!(pool_id, %sender, %share_in, %tokens_out, "exited pool for exact amount");
        Ok(LiquidityReceipt {
            pool_id,
            shares: share_in,
            tokens: tokens_out,
        })
    }

    // -- helpers ----------------------------------------------------------------

    fn active_pool(&mut self, pool_id: u64, now: Timestamp) -> Result<Pool> {
        let pool = self.registry.get_pool_and_poke(pool_id, now)?;
        pool.ensure_active()?;
        Ok(pool)
    }

    /// Sender must hold some shares of `pool`, and at least `needed`.
    fn ensure_shares(&self, sender: &Address, pool: &Pool, needed: Amount) -> Result<()> {
        let denom = pool.share_denom();
        let held = self.ledger.balance(sender, &denom);
        if !held.is_positive() {
            return Err(AmmError::NoSharesHeld {
                account: sender.clone(),
                pool_id: pool.id(),
            });
        }
        if held < needed {
            return Err(AmmError::InsufficientFunds {
                account: sender.clone(),
                denom,
                required: needed,
                available: held,
            });
        }
        Ok(())
    }

    fn commit(&mut self, plan: EffectPlan, pool: Pool) -> Result<()> {
        plan.preflight(&self.ledger)?;
        plan.execute(&mut self.ledger)?;
        self.registry.set_pool(pool)
    }
}

fn single_coin(denom: &str, amount: Amount) -> Result<Coins> {
    let mut coins = Coins::new();
    coins.add_amount(denom, amount)?;
    Ok(coins)
}

fn slippage(what: &'static str, denom: &str, limit: Amount, actual: Amount) -> AmmError {
    warn!(what, denom, %limit, %actual, "slippage bound rejected operation");
    AmmError::SlippageExceeded {
        what,
        denom: denom.to_owned(),
        limit,
        actual,
    }
}
