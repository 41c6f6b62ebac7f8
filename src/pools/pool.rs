//! The weighted pool entity and its structural invariants.
//!
//! A [`Pool`] is a basket of weighted reserves plus an outstanding supply
//! of shares.  Its constructor enforces every structural invariant; after
//! that only the liquidity operations (balances and share supply) and due
//! scheduled changes (activation, governor, weights) mutate it.
//!
//! # Invariants
//!
//! - `assets` is non-empty, denoms are distinct and well-formed.
//! - Every weight lies in `1..=2^20` and every balance is `> 0`.
//! - `total_weight` is the sum of the asset weights.
//! - `total_shares > 0`.
//! - `swap_fee` and `exit_fee` lie in `[0, 1)`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::schedule::{Progress, ScheduledChange};
use crate::config::PoolParams;
use crate::domain::{
    validate_denom, Address, Amount, Coins, FutureGovernor, PoolAsset, Timestamp, Weight,
};
use crate::error::{AmmError, Result};
use crate::math::{CheckedArithmetic, Dec};

/// Minimal-unit scale of one pool share (`10^18`).
pub const ONE_SHARE: Amount = Amount::new(1_000_000_000_000_000_000);

/// Shares minted to a pool's creator (`100 * ONE_SHARE`).
pub const INIT_POOL_SHARES_SUPPLY: Amount = Amount::new(100_000_000_000_000_000_000);

/// Denom of the shares of pool `pool_id`.
///
/// # Examples
///
/// ```
/// use weighted_pools::pools::share_denom;
///
/// assert_eq!(share_denom(7), "gamm/pool/7");
/// ```
#[must_use]
pub fn share_denom(pool_id: u64) -> String {
    format!("gamm/pool/{pool_id}")
}

/// A weighted multi-asset reserve pool.
///
/// Built with [`Pool::new`]; snapshots are handed out by the
/// [`PoolRegistry`](crate::registry::PoolRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    id: u64,
    address: Address,
    assets: Vec<PoolAsset>,
    total_weight: Weight,
    total_shares: Amount,
    params: PoolParams,
    future_governor: FutureGovernor,
    governor: FutureGovernor,
    created_at: Timestamp,
    active: bool,
    pending: Vec<ScheduledChange>,
}

impl Pool {
    /// Builds and validates a new pool holding `assets`.
    ///
    /// The pool starts with [`INIT_POOL_SHARES_SUPPLY`] shares.  With a
    /// `start_time` later than `now` it is inactive until then.  A
    /// non-empty `future_governor` takes over at the start time, and a
    /// smooth weight change in `params` is scheduled from its own start
    /// (or the pool's start when unset).  Changes already due at `now` are
    /// applied before returning.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for an empty asset list or a
    ///   weight schedule that does not cover exactly the pool's denoms.
    /// - [`AmmError::InvalidToken`] for a malformed or duplicate denom.
    /// - [`AmmError::InvalidWeight`] for a weight outside `1..=2^20`.
    /// - [`AmmError::InvalidQuantity`] for a non-positive balance.
    /// - [`AmmError::InvalidFee`] for a fee outside `[0, 1)`.
    /// - [`AmmError::Overflow`] if the weights overflow when summed.
    pub fn new(
        id: u64,
        assets: Vec<PoolAsset>,
        params: PoolParams,
        future_governor: FutureGovernor,
        now: Timestamp,
        start_time: Option<Timestamp>,
    ) -> Result<Self> {
        params.validate()?;
        let total_weight = validate_assets(&assets)?;

        let start = start_time.unwrap_or(now);
        let mut pending = Vec::new();
        if start > now {
            pending.push(ScheduledChange::Activation {
                effective_at: start,
            });
        }
        if future_governor != FutureGovernor::None {
            pending.push(ScheduledChange::GovernorHandover {
                governor: future_governor.clone(),
                effective_at: start,
            });
        }
        if let Some(change) = params.smooth_weight_change() {
            check_weights_cover(&assets, &change.target_weights)?;
            pending.push(ScheduledChange::WeightTransition {
                start: change.start_time.unwrap_or(start),
                duration: change.duration,
                initial: weights_of(&assets),
                target: change.target_weights.clone(),
            });
        }

        let mut pool = Self {
            id,
            address: Address::for_pool(id),
            assets,
            total_weight,
            total_shares: INIT_POOL_SHARES_SUPPLY,
            params,
            future_governor,
            governor: FutureGovernor::None,
            created_at: now,
            active: start <= now,
            pending,
        };
        pool.poke(now)?;
        Ok(pool)
    }

    // -- accessors ------------------------------------------------------------

    /// Pool identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Account holding the pool's reserves.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// Reserves in creation order.
    #[must_use]
    pub fn assets(&self) -> &[PoolAsset] {
        &self.assets
    }

    /// Looks up an asset by denom, returning its index too.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if the pool does not hold `denom`.
    pub fn asset(&self, denom: &str) -> Result<(usize, &PoolAsset)> {
        self.assets
            .iter()
            .enumerate()
            .find(|(_, a)| a.denom() == denom)
            .ok_or_else(|| AmmError::invalid_token(denom, "not in pool"))
    }

    /// Sum of all asset weights.
    pub const fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Outstanding shares.
    pub const fn total_shares(&self) -> Amount {
        self.total_shares
    }

    /// Denom of this pool's shares.
    #[must_use]
    pub fn share_denom(&self) -> String {
        share_denom(self.id)
    }

    /// Fee and schedule parameters.
    #[must_use]
    pub const fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> Dec {
        self.params.swap_fee()
    }

    /// Exit fee.
    #[must_use]
    pub const fn exit_fee(&self) -> Dec {
        self.params.exit_fee()
    }

    /// Governor descriptor supplied at creation.
    #[must_use]
    pub const fn future_governor(&self) -> &FutureGovernor {
        &self.future_governor
    }

    /// Governor in charge now; [`FutureGovernor::None`] before handover.
    #[must_use]
    pub const fn governor(&self) -> &FutureGovernor {
        &self.governor
    }

    /// Creation time.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Whether joins and exits are accepted, as of the last poke.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Changes not yet fully applied.
    #[must_use]
    pub fn pending_changes(&self) -> &[ScheduledChange] {
        &self.pending
    }

    /// Reserve balances as a coin set.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only if a balance sum overflows.
    pub fn balances(&self) -> Result<Coins> {
        let mut coins = Coins::new();
        for asset in &self.assets {
            coins.add_amount(asset.denom(), asset.balance())?;
        }
        Ok(coins)
    }

    /// Fails with [`AmmError::PoolInactive`] unless the pool is active.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn ensure_active(&self) -> Result<()> {
        if self.active {
            return Ok(());
        }
        let starts_at = self
            .pending
            .iter()
            .find_map(|c| match c {
                ScheduledChange::Activation { effective_at } => Some(*effective_at),
                _ => None,
            })
            .unwrap_or(self.created_at);
        Err(AmmError::PoolInactive {
            pool_id: self.id,
            starts_at,
        })
    }

    // -- scheduled changes ----------------------------------------------------

    /// Applies every pending change due at `now`.
    ///
    /// Idempotent for a fixed `now`; calling it with an earlier time than a
    /// previous call is harmless because applied changes are gone.  On error
    /// the pool is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if a weight interpolation overflows.
    /// - [`AmmError::InvalidWeight`] if a transition yields an invalid weight.
    pub fn poke(&mut self, now: Timestamp) -> Result<()> {
        let mut next = self.clone();
        next.apply_due(now)?;
        *self = next;
        Ok(())
    }

    fn apply_due(&mut self, now: Timestamp) -> Result<()> {
        let mut remaining = Vec::with_capacity(self.pending.len());
        for change in core::mem::take(&mut self.pending) {
            match change.progress(now)? {
                Progress::Pending => remaining.push(change),
                Progress::Partial(weights) => {
                    self.set_weights(&weights)?;
                    remaining.push(change);
                }
                Progress::Done => {
                    self.apply(&change, now)?;
                    debug!(pool_id = self.id, ?change, %now, "applied scheduled change");
                }
            }
        }
        self.pending = remaining;
        Ok(())
    }

    /// Queues a change; it is applied by the next poke at or after its time.
    ///
    /// # Errors
    ///
    /// For a weight transition whose initial or target weights do not
    /// cover exactly the pool's denoms ([`AmmError::InvalidConfiguration`])
    /// or contain a weight outside `1..=2^20` ([`AmmError::InvalidWeight`]).
    pub fn schedule(&mut self, change: ScheduledChange) -> Result<()> {
        if let ScheduledChange::WeightTransition {
            initial, target, ..
        } = &change
        {
            check_weights_cover(&self.assets, initial)?;
            check_weights_cover(&self.assets, target)?;
        }
        self.pending.push(change);
        Ok(())
    }

    fn apply(&mut self, change: &ScheduledChange, now: Timestamp) -> Result<()> {
        match change {
            ScheduledChange::Activation { .. } => self.active = true,
            ScheduledChange::GovernorHandover { governor, .. } => {
                self.governor = governor.clone();
            }
            ScheduledChange::WeightTransition { .. } => {
                if let Some(weights) = change.weights_at(now)? {
                    self.set_weights(&weights)?;
                }
            }
        }
        Ok(())
    }

    fn set_weights(&mut self, weights: &BTreeMap<String, Weight>) -> Result<()> {
        let mut total = Weight::ZERO;
        for asset in &mut self.assets {
            if let Some(w) = weights.get(asset.denom()) {
                w.validate()?;
                asset.weight = *w;
            }
            total = total.safe_add(&asset.weight)?;
        }
        self.total_weight = total;
        Ok(())
    }

    // -- liquidity mutation ---------------------------------------------------

    /// Adds `tokens` to the reserves and `shares` to the supply.
    pub(crate) fn add_liquidity(&mut self, tokens: &Coins, shares: Amount) -> Result<()> {
        for (denom, amount) in tokens.iter() {
            let (index, asset) = self.asset(denom)?;
            let next = asset.balance().safe_add(&amount)?;
            self.set_balance(index, next)?;
        }
        let total = self.total_shares.safe_add(&shares)?;
        self.set_total_shares(total)
    }

    /// Removes `tokens` from the reserves and `shares` from the supply.
    ///
    /// Fails rather than leaving an empty reserve or a zero supply.
    pub(crate) fn remove_liquidity(&mut self, tokens: &Coins, shares: Amount) -> Result<()> {
        for (denom, amount) in tokens.iter() {
            let (index, asset) = self.asset(denom)?;
            let next = asset.balance().safe_sub(&amount)?;
            self.set_balance(index, next)?;
        }
        let total = self.total_shares.safe_sub(&shares)?;
        self.set_total_shares(total)
    }

    /// Overwrites the balance of the asset at `index`.
    pub(crate) fn set_balance(&mut self, index: usize, balance: Amount) -> Result<()> {
        if !balance.is_positive() {
            return Err(AmmError::InvalidQuantity("pool balances must stay positive"));
        }
        let asset = self
            .assets
            .get_mut(index)
            .ok_or(AmmError::InvalidConfiguration("asset index out of range"))?;
        asset.token.amount = balance;
        Ok(())
    }

    /// Overwrites the outstanding share supply.
    pub(crate) fn set_total_shares(&mut self, shares: Amount) -> Result<()> {
        if !shares.is_positive() {
            return Err(AmmError::InvalidQuantity("share supply must stay positive"));
        }
        self.total_shares = shares;
        Ok(())
    }
}

fn validate_assets(assets: &[PoolAsset]) -> Result<Weight> {
    if assets.is_empty() {
        return Err(AmmError::InvalidConfiguration("pool needs at least one asset"));
    }
    let mut seen = BTreeSet::new();
    let mut total = Weight::ZERO;
    for asset in assets {
        validate_denom(asset.denom())?;
        if !seen.insert(asset.denom()) {
            return Err(AmmError::invalid_token(asset.denom(), "duplicate denom"));
        }
        asset.weight.validate()?;
        if !asset.balance().is_positive() {
            return Err(AmmError::InvalidQuantity("initial balance must be positive"));
        }
        total = total.safe_add(&asset.weight)?;
    }
    Ok(total)
}

fn check_weights_cover(assets: &[PoolAsset], weights: &BTreeMap<String, Weight>) -> Result<()> {
    let denoms: BTreeSet<&str> = assets.iter().map(PoolAsset::denom).collect();
    let keys: BTreeSet<&str> = weights.keys().map(String::as_str).collect();
    if denoms != keys {
        return Err(AmmError::InvalidConfiguration(
            "weight schedule must cover exactly the pool's denoms",
        ));
    }
    weights.values().try_for_each(Weight::validate)
}

fn weights_of(assets: &[PoolAsset]) -> BTreeMap<String, Weight> {
    assets
        .iter()
        .map(|a| (a.denom().to_owned(), a.weight))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use core::time::Duration;

    use super::*;
    use crate::config::SmoothWeightChange;
    use crate::error::ErrorKind;

    fn assets() -> Vec<PoolAsset> {
        vec![
            PoolAsset::new("foo", Amount::new(5_000_000), Weight::new(100)),
            PoolAsset::new("bar", Amount::new(5_000_000), Weight::new(200)),
        ]
    }

    fn build(assets: Vec<PoolAsset>) -> Result<Pool> {
        Pool::new(
            1,
            assets,
            PoolParams::zero_fee(),
            FutureGovernor::None,
            Timestamp::from_secs(1_000),
            None,
        )
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn new_pool_basics() {
        let Ok(pool) = build(assets()) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.id(), 1);
        assert_eq!(pool.total_shares(), INIT_POOL_SHARES_SUPPLY);
        assert_eq!(pool.total_weight(), Weight::new(300));
        assert_eq!(pool.share_denom(), "gamm/pool/1");
        assert!(pool.is_active());
        assert!(pool.pending_changes().is_empty());
        assert_eq!(pool.assets().first().map(PoolAsset::denom), Some("foo"));
        let Ok(balances) = pool.balances() else {
            panic!("expected Ok");
        };
        assert_eq!(balances.to_string(), "5000000bar,5000000foo");
    }

    #[test]
    fn structural_violations_are_validation_errors() {
        let cases: Vec<Vec<PoolAsset>> = vec![
            vec![],
            vec![PoolAsset::new("foo", Amount::new(1), Weight::new(0))],
            vec![PoolAsset::new("foo", Amount::new(1), Weight::new(-1))],
            vec![
                PoolAsset::new("foo", Amount::new(1), Weight::new(1)),
                PoolAsset::new("bar", Amount::new(1), Weight::new(10i128.pow(19))),
            ],
            vec![PoolAsset::new("foo", Amount::ZERO, Weight::new(1))],
            vec![PoolAsset::new("foo", Amount::new(-1), Weight::new(1))],
            vec![
                PoolAsset::new("foo", Amount::new(1), Weight::new(1)),
                PoolAsset::new("foo", Amount::new(2), Weight::new(1)),
            ],
        ];
        for case in cases {
            let Err(err) = build(case.clone()) else {
                panic!("{case:?} should be rejected");
            };
            assert_eq!(err.kind(), ErrorKind::Validation, "{case:?}");
        }
    }

    #[test]
    fn asset_lookup() {
        let Ok(pool) = build(assets()) else {
            panic!("expected Ok");
        };
        let Ok((idx, asset)) = pool.asset("bar") else {
            panic!("expected bar");
        };
        assert_eq!(idx, 1);
        assert_eq!(asset.weight, Weight::new(200));
        assert!(matches!(pool.asset("baz"), Err(AmmError::InvalidToken { .. })));
    }

    // -- activation & governor ------------------------------------------------

    #[test]
    fn future_start_time_keeps_pool_inactive_until_poked() {
        let Ok(mut pool) = Pool::new(
            3,
            assets(),
            PoolParams::zero_fee(),
            FutureGovernor::None,
            Timestamp::from_secs(1_000),
            Some(Timestamp::from_secs(2_000)),
        ) else {
            panic!("expected Ok");
        };
        assert!(!pool.is_active());
        assert_eq!(
            pool.ensure_active(),
            Err(AmmError::PoolInactive {
                pool_id: 3,
                starts_at: Timestamp::from_secs(2_000)
            })
        );

        let Ok(()) = pool.poke(Timestamp::from_secs(1_999)) else {
            panic!("expected Ok");
        };
        assert!(!pool.is_active());
        let Ok(()) = pool.poke(Timestamp::from_secs(2_000)) else {
            panic!("expected Ok");
        };
        assert!(pool.is_active());
        assert!(pool.ensure_active().is_ok());
    }

    #[test]
    fn governor_handover_at_start() {
        let governor = FutureGovernor::LockedShares {
            duration: Duration::from_secs(86_400),
        };
        let Ok(mut pool) = Pool::new(
            1,
            assets(),
            PoolParams::zero_fee(),
            governor.clone(),
            Timestamp::from_secs(0),
            Some(Timestamp::from_secs(10)),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.governor(), &FutureGovernor::None);
        assert_eq!(pool.future_governor(), &governor);
        let Ok(()) = pool.poke(Timestamp::from_secs(10)) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.governor(), &governor);
    }

    #[test]
    fn immediate_governor_is_installed_at_creation() {
        let governor = FutureGovernor::Account(Address::new("osmo1qqqqqqqq"));
        let Ok(pool) = Pool::new(
            1,
            assets(),
            PoolParams::zero_fee(),
            governor.clone(),
            Timestamp::from_secs(5),
            None,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.governor(), &governor);
        assert!(pool.pending_changes().is_empty());
    }

    // -- weight schedule ------------------------------------------------------

    #[test]
    fn smooth_weight_change_moves_weights() {
        let change = SmoothWeightChange {
            start_time: None,
            duration: Duration::from_secs(100),
            target_weights: [
                ("foo".to_owned(), Weight::new(200)),
                ("bar".to_owned(), Weight::new(100)),
            ]
            .into_iter()
            .collect(),
        };
        let Ok(params) = PoolParams::new(Dec::ZERO, Dec::ZERO, Some(change)) else {
            panic!("expected Ok");
        };
        let Ok(mut pool) = Pool::new(
            1,
            assets(),
            params,
            FutureGovernor::None,
            Timestamp::from_secs(0),
            None,
        ) else {
            panic!("expected Ok");
        };
        let Ok(()) = pool.poke(Timestamp::from_secs(50)) else {
            panic!("expected Ok");
        };
        let Ok((_, foo)) = pool.asset("foo") else {
            panic!("expected foo");
        };
        assert_eq!(foo.weight, Weight::new(150));
        assert_eq!(pool.total_weight(), Weight::new(300));
        assert_eq!(pool.pending_changes().len(), 1);

        let Ok(()) = pool.poke(Timestamp::from_secs(100)) else {
            panic!("expected Ok");
        };
        let Ok((_, bar)) = pool.asset("bar") else {
            panic!("expected bar");
        };
        assert_eq!(bar.weight, Weight::new(100));
        assert!(pool.pending_changes().is_empty());
    }

    #[test]
    fn weight_schedule_must_match_denoms() {
        let change = SmoothWeightChange {
            start_time: None,
            duration: Duration::from_secs(100),
            target_weights: [("foo".to_owned(), Weight::new(1))].into_iter().collect(),
        };
        let Ok(params) = PoolParams::new(Dec::ZERO, Dec::ZERO, Some(change)) else {
            panic!("expected Ok");
        };
        let Err(AmmError::InvalidConfiguration(_)) = Pool::new(
            1,
            assets(),
            params,
            FutureGovernor::None,
            Timestamp::EPOCH,
            None,
        ) else {
            panic!("expected InvalidConfiguration");
        };
    }

    fn transition_to(target: &[(&str, i128)]) -> ScheduledChange {
        let weights = |list: &[(&str, i128)]| -> BTreeMap<String, Weight> {
            list.iter()
                .map(|(d, w)| ((*d).to_owned(), Weight::new(*w)))
                .collect()
        };
        ScheduledChange::WeightTransition {
            start: Timestamp::from_secs(1_000),
            duration: Duration::from_secs(100),
            initial: weights(&[("foo", 100), ("bar", 200)]),
            target: weights(target),
        }
    }

    #[test]
    fn schedule_rejects_invalid_transitions() {
        let Ok(mut pool) = build(assets()) else {
            panic!("expected Ok");
        };
        let before = pool.clone();
        let zero_bar = transition_to(&[("foo", 300), ("bar", 0)]);
        let Err(AmmError::InvalidWeight(_)) = pool.schedule(zero_bar) else {
            panic!("expected InvalidWeight");
        };
        let Err(AmmError::InvalidConfiguration(_)) = pool.schedule(transition_to(&[("foo", 300)]))
        else {
            panic!("expected InvalidConfiguration");
        };
        assert_eq!(pool, before);
        assert!(pool.schedule(transition_to(&[("foo", 300), ("bar", 100)])).is_ok());
        assert_eq!(pool.pending_changes().len(), 1);
    }

    #[test]
    fn failed_poke_leaves_pool_untouched() {
        let Ok(mut pool) = Pool::new(
            1,
            assets(),
            PoolParams::zero_fee(),
            FutureGovernor::None,
            Timestamp::from_secs(1_000),
            Some(Timestamp::from_secs(1_050)),
        ) else {
            panic!("expected Ok");
        };
        // bypasses schedule() to store a transition that cannot apply
        pool.pending.push(transition_to(&[("foo", 300), ("bar", 0)]));
        let before = pool.clone();

        let Err(AmmError::InvalidWeight(_)) = pool.poke(Timestamp::from_secs(2_000)) else {
            panic!("expected InvalidWeight");
        };
        assert_eq!(pool, before);
        assert!(!pool.is_active());
        assert_eq!(pool.pending_changes().len(), 2);
        assert_eq!(pool.total_weight(), Weight::new(300));
    }

    // -- mutation guards ------------------------------------------------------

    #[test]
    fn balances_and_supply_stay_positive() {
        let Ok(mut pool) = build(assets()) else {
            panic!("expected Ok");
        };
        assert!(pool.set_balance(0, Amount::ZERO).is_err());
        assert!(pool.set_balance(9, Amount::new(1)).is_err());
        assert!(pool.set_total_shares(Amount::ZERO).is_err());
        assert!(pool.set_balance(0, Amount::new(7)).is_ok());
        assert_eq!(pool.assets().first().map(PoolAsset::balance), Some(Amount::new(7)));
    }

    #[test]
    fn liquidity_moves_balances_and_supply() {
        let Ok(mut pool) = build(assets()) else {
            panic!("expected Ok");
        };
        let Ok(tokens) = pool.balances() else {
            panic!("expected Ok");
        };
        let Ok(()) = pool.add_liquidity(&tokens, INIT_POOL_SHARES_SUPPLY) else {
            panic!("expected Ok");
        };
        let Ok(doubled) = pool.balances() else {
            panic!("expected Ok");
        };
        assert_eq!(doubled.to_string(), "10000000bar,10000000foo");
        assert_eq!(pool.total_shares().get(), 2 * INIT_POOL_SHARES_SUPPLY.get());

        let Ok(()) = pool.remove_liquidity(&tokens, INIT_POOL_SHARES_SUPPLY) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.total_shares(), INIT_POOL_SHARES_SUPPLY);
        assert!(pool.remove_liquidity(&tokens, Amount::new(1)).is_err());
        assert!(matches!(
            pool.remove_liquidity(&doubled, Amount::new(1)),
            Err(AmmError::Underflow(_))
        ));
        assert!(matches!(
            pool.add_liquidity(&tokens_of("baz"), Amount::ZERO),
            Err(AmmError::InvalidToken { .. })
        ));
    }

    fn tokens_of(denom: &str) -> Coins {
        let mut coins = Coins::new();
        let Ok(()) = coins.add_amount(denom, Amount::new(1)) else {
            panic!("expected Ok");
        };
        coins
    }
}
