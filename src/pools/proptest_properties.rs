//! Property-based tests for the weighted-pool invariant math.
//!
//! These tests use `proptest` to verify that the join/exit formulas never
//! hand out value the pool did not receive, across random balances,
//! weights and request sizes.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::invariant::{
    proportional_amounts_for_withdrawal, proportional_shares_for_deposit,
    single_asset_exit_amount, single_asset_join_shares, spot_price,
};
use super::{Pool, INIT_POOL_SHARES_SUPPLY};
use crate::config::PoolParams;
use crate::domain::{Amount, FutureGovernor, PoolAsset, Timestamp, Weight};
use crate::math::Dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_pool(ba: i128, wa: i128, bb: i128, wb: i128) -> Pool {
    let assets = vec![
        PoolAsset::new("foo", Amount::new(ba), Weight::new(wa)),
        PoolAsset::new("bar", Amount::new(bb), Weight::new(wb)),
    ];
    let Ok(pool) = Pool::new(
        1,
        assets,
        PoolParams::zero_fee(),
        FutureGovernor::None,
        Timestamp::EPOCH,
        None,
    ) else {
        panic!("valid pool");
    };
    pool
}

/// Applies a deposit of `coins` minting `shares` to a pool snapshot.
fn apply_join(pool: &mut Pool, denoms: &[(&str, i128)], shares: i128) {
    for (denom, amount) in denoms {
        let Ok((index, asset)) = pool.asset(denom) else {
            panic!("denom in pool");
        };
        let next = asset.balance().get() + amount;
        let Ok(()) = pool.set_balance(index, Amount::new(next)) else {
            panic!("positive balance");
        };
    }
    let total = pool.total_shares().get() + shares;
    let Ok(()) = pool.set_total_shares(Amount::new(total)) else {
        panic!("positive supply");
    };
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Balances in range [10_000, 10_000_000] to avoid extremes.
fn balance_strategy() -> impl Strategy<Value = i128> {
    10_000i128..=10_000_000i128
}

/// Unnormalized weights in [1, 100].
fn weight_strategy() -> impl Strategy<Value = i128> {
    1i128..=100i128
}

/// Share requests between 0.0001% and 50% of the initial supply.
fn share_strategy() -> impl Strategy<Value = i128> {
    let supply = INIT_POOL_SHARES_SUPPLY.get();
    (supply / 1_000_000)..=(supply / 2)
}

// ---------------------------------------------------------------------------
// Property 1: Proportional deposits never under-pay
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_covers_withdrawal(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        shares in share_strategy(),
    ) {
        let pool = make_pool(ba, wa, bb, wb);
        let Ok(required) = proportional_shares_for_deposit(&pool, Amount::new(shares)) else {
            return Ok(());
        };
        let Ok(refund) = proportional_amounts_for_withdrawal(&pool, Amount::new(shares)) else {
            return Ok(());
        };
        for (denom, owed) in refund.iter() {
            prop_assert!(
                required.amount_of(denom) >= owed,
                "deposit of {} below refund of {} for {}",
                required.amount_of(denom), owed, denom
            );
        }
    }

    #[test]
    fn prop_proportional_round_trip_loses_value(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        shares in share_strategy(),
    ) {
        let mut pool = make_pool(ba, wa, bb, wb);
        let Ok(required) = proportional_shares_for_deposit(&pool, Amount::new(shares)) else {
            return Ok(());
        };
        let paid: Vec<(&str, i128)> = required.iter().map(|(d, a)| (d, a.get())).collect();
        apply_join(&mut pool, &paid, shares);

        let Ok(refund) = proportional_amounts_for_withdrawal(&pool, Amount::new(shares)) else {
            return Ok(());
        };
        for (denom, back) in refund.iter() {
            prop_assert!(
                back <= required.amount_of(denom),
                "round trip gained {}: paid {} got {}",
                denom, required.amount_of(denom), back
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Single-asset round trip is bounded
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_single_asset_round_trip_bounded(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in 1i128..=99i128,
    ) {
        let amount_in = (ba * pct / 100).max(1);
        let mut pool = make_pool(ba, wa, bb, wb);
        let Ok(shares) = single_asset_join_shares(&pool, 0, Amount::new(amount_in)) else {
            return Ok(());
        };
        if !shares.is_positive() { return Ok(()); }
        apply_join(&mut pool, &[("foo", amount_in)], shares.get());

        let Ok(out) = single_asset_exit_amount(&pool, 0, shares) else {
            return Ok(());
        };
        // Fixed-point pow approximations can leave a sub-ppm residue.
        prop_assert!(
            out.get() <= amount_in + amount_in / 100_000,
            "round trip gained value: in={} out={}",
            amount_in, out
        );
    }

    #[test]
    fn prop_join_shares_below_proportional_share(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in 1i128..=99i128,
    ) {
        // (1 + x)^w - 1 <= w * x for 0 < w < 1, so a single-asset join
        // never mints more than its weight-scaled share of the supply.
        let amount_in = (ba * pct / 100).max(1);
        let pool = make_pool(ba, wa, bb, wb);
        let Ok(shares) = single_asset_join_shares(&pool, 0, Amount::new(amount_in)) else {
            return Ok(());
        };
        let supply = pool.total_shares().get();
        let linear = supply / ba * amount_in * wa / (wa + wb);
        prop_assert!(
            shares.get() <= linear + supply / 1_000_000,
            "shares {} exceed linear bound {}",
            shares, linear
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Spot prices are positive and reciprocal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_spot_price_reciprocal(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
    ) {
        let pool = make_pool(ba, wa, bb, wb);
        let Ok(forward) = spot_price(&pool, "foo", "bar") else {
            panic!("spot price defined");
        };
        let Ok(backward) = spot_price(&pool, "bar", "foo") else {
            panic!("spot price defined");
        };
        prop_assert!(forward.is_positive());
        prop_assert!(backward.is_positive());

        let Ok(product) = forward.checked_mul(&backward) else {
            panic!("product representable");
        };
        let Ok((diff, _)) = product.abs_diff(&Dec::ONE) else {
            panic!("difference representable");
        };
        let Ok(tolerance) = "0.000000001".parse::<Dec>() else {
            panic!("valid literal");
        };
        prop_assert!(diff <= tolerance, "forward*backward = {}", product);
    }
}
