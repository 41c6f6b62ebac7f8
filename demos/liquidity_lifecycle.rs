//! Weighted pool liquidity lifecycle example.
//!
//! Demonstrates creating a 1:2 weighted pool, joining it proportionally
//! and with a single asset, and exiting both ways, all against the
//! in-memory reference ledger.
//!
//! # Run
//!
//! ```bash
//! cargo run --example liquidity_lifecycle
//! ```

use weighted_pools::config::{ModuleParams, PoolParams};
use weighted_pools::domain::{
    Address, Amount, Coin, Coins, FutureGovernor, PoolAsset, Timestamp, Weight,
};
use weighted_pools::ledger::InMemoryLedger;
use weighted_pools::operations::LiquidityOperations;
use weighted_pools::pools::ONE_SHARE;
use weighted_pools::traits::LedgerAdapter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Weighted Pool Liquidity Lifecycle ===\n");

    // ── 1. Fund an account ──────────────────────────────────────────────
    let alice = Address::new("osmo1alice");
    let funds = Coins::try_from_coins([
        Coin::new("uosmo", Amount::new(10_000_000_000)),
        Coin::new("foo", Amount::new(10_000_000)),
        Coin::new("bar", Amount::new(10_000_000)),
    ])?;
    let mut ledger = InMemoryLedger::new();
    ledger.fund(&alice, &funds)?;
    println!("Alice starts with {funds}");

    // ── 2. Module parameters from TOML ──────────────────────────────────
    let params = ModuleParams::from_toml_str(
        "[[pool_creation_fee]]\ndenom = \"uosmo\"\namount = 1000000000\n",
    )?;
    println!("Pool creation fee: {}", params.pool_creation_fee());
    let mut ops = LiquidityOperations::new(ledger, params);

    // ── 3. Create a foo/bar pool weighted 1:2 ───────────────────────────
    let now = Timestamp::from_secs(1_700_000_000);
    let pool_id = ops.create_pool(
        &alice,
        vec![
            PoolAsset::new("foo", Amount::new(5_000_000), Weight::new(100)),
            PoolAsset::new("bar", Amount::new(5_000_000), Weight::new(200)),
        ],
        PoolParams::new("0.003".parse()?, "0".parse()?, None)?,
        FutureGovernor::None,
        None,
        now,
    )?;
    let pool = ops.registry().get_pool(pool_id)?;
    println!("\nPool {pool_id} created");
    println!("  Reserves:      {}", pool.balances()?);
    println!("  Total shares:  {}", pool.total_shares());
    println!("  Spot foo/bar:  {}", ops.spot_price(pool_id, "foo", "bar", now)?);

    // ── 4. Proportional join ────────────────────────────────────────────
    let share_out = Amount::new(10 * ONE_SHARE.get());
    let joined = ops.join_pool_no_swap(&alice, pool_id, share_out, &Coins::new(), now)?;
    println!("\n--- Join {share_out} shares ---");
    println!("  Paid:          {}", joined.tokens);

    // ── 5. Single-asset join ────────────────────────────────────────────
    let foo_in = Coins::try_from_coins([Coin::new("foo", Amount::new(100_000))])?;
    let single = ops.join_swap_exact_amount_in(&alice, pool_id, &foo_in, Amount::ZERO, now)?;
    println!("\n--- Join with {foo_in} ---");
    println!("  Shares minted: {}", single.shares);
    println!("  Spot foo/bar:  {}", ops.spot_price(pool_id, "foo", "bar", now)?);

    let one_share = ops.join_swap_share_amount_out(
        &alice,
        pool_id,
        "bar",
        ONE_SHARE,
        Amount::new(100_000),
        now,
    )?;
    println!("\n--- Join for exactly {ONE_SHARE} shares with bar ---");
    println!("  Paid:          {}", one_share.tokens);

    // ── 6. Exit to a single asset, then for an exact amount ─────────────
    let out =
        ops.exit_swap_share_amount_in(&alice, pool_id, "bar", single.shares, Amount::ZERO, now)?;
    println!("\n--- Exit {} shares to bar ---", single.shares);
    println!("  Received:      {}", out.tokens);

    let exact = Coin::new("foo", Amount::new(50_000));
    let burned = ops.exit_swap_exact_amount_out(&alice, pool_id, &exact, share_out, now)?;
    println!("\n--- Exit for exactly {exact} ---");
    println!("  Shares burned: {}", burned.shares);

    // ── 7. Proportional exit of what is left of the join ────────────────
    let rest = share_out.checked_sub(&burned.shares).ok_or("share underflow")?;
    let refund = ops.exit_pool(&alice, pool_id, rest, &Coins::new(), now)?;
    println!("\n--- Exit {rest} shares ---");
    println!("  Refund:        {}", refund.tokens);

    println!("\nAlice ends with {}", ops.ledger().all_balances(&alice));
    println!("Fee sink holds  {}", ops.ledger().fee_sink());
    println!("\n=== Done ===");
    Ok(())
}
