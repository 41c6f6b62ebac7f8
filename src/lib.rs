//! # Weighted Pools
//!
//! Liquidity-pool engine for weighted multi-asset AMM pools: create pools,
//! mint and burn pool shares, and compute the exact quantities moved on
//! every liquidity event.
//!
//! All arithmetic is 18-decimal fixed point ([`math::Dec`]) with
//! half-to-even rounding on every multiplication and division, so
//! re-executing an operation always produces identical results.  Balances
//! live outside the engine behind the [`traits::LedgerAdapter`] seam.
//!
//! ## Create a pool and join it
//!
//! ```rust
//! use weighted_pools::config::{ModuleParams, PoolParams};
//! use weighted_pools::domain::{
//!     Address, Amount, Coin, Coins, FutureGovernor, PoolAsset, Timestamp, Weight,
//! };
//! use weighted_pools::ledger::InMemoryLedger;
//! use weighted_pools::operations::LiquidityOperations;
//! use weighted_pools::pools::ONE_SHARE;
//!
//! let alice = Address::new("alice");
//! let funds = Coins::try_from_coins([
//!     Coin::new("foo", Amount::new(20_000)),
//!     Coin::new("bar", Amount::new(20_000)),
//! ])
//! .expect("valid coins");
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.fund(&alice, &funds).expect("funded");
//! let mut ops = LiquidityOperations::new(ledger, ModuleParams::default());
//!
//! // 1. Create a 50/50 pool; the creator receives 100 shares.
//! let now = Timestamp::from_secs(1_700_000_000);
//! let pool_id = ops
//!     .create_pool(
//!         &alice,
//!         vec![
//!             PoolAsset::new("foo", Amount::new(10_000), Weight::new(100)),
//!             PoolAsset::new("bar", Amount::new(10_000), Weight::new(100)),
//!         ],
//!         PoolParams::zero_fee(),
//!         FutureGovernor::None,
//!         None,
//!         now,
//!     )
//!     .expect("pool created");
//!
//! // 2. Mint 50 more shares with a proportional deposit.
//! let share_out = Amount::new(50 * ONE_SHARE.get());
//! let receipt = ops
//!     .join_pool_no_swap(&alice, pool_id, share_out, &Coins::new(), now)
//!     .expect("joined");
//! assert_eq!(receipt.tokens.to_string(), "5000bar,5000foo");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ LiquidityOperations  │  validate, bound-check, plan, commit
//! └──────────┬───────────┘
//!            │ get_pool_and_poke / set_pool        ┌──────────────┐
//!            ├────────────────────────────────────▶│ PoolRegistry │
//!            │ EffectPlan (transfer/mint/burn)     └──────────────┘
//!            ├────────────────────────────────────▶ LedgerAdapter
//!            ▼
//! ┌──────────────────────┐
//! │  pools::invariant    │  share and amount formulas
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │  math (Dec, pow)     │  18-decimal fixed point
//! └──────────────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Coins`](domain::Coins), [`Weight`](domain::Weight), [`FutureGovernor`](domain::FutureGovernor), etc. |
//! | [`math`] | [`Dec`](math::Dec) fixed point, [`pow`](math::pow), exact [`mul_div`](math::mul_div) |
//! | [`config`] | [`PoolParams`](config::PoolParams) and TOML-loadable [`ModuleParams`](config::ModuleParams) |
//! | [`pools`] | [`Pool`](pools::Pool), scheduled changes, and the [`invariant`](pools::invariant) formulas |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) ownership and id assignment |
//! | [`operations`] | [`LiquidityOperations`](operations::LiquidityOperations) |
//! | [`traits`] | [`LedgerAdapter`](traits::LedgerAdapter) seam |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference adapter |
//! | [`error`] | [`AmmError`](error::AmmError) and its [`ErrorKind`](error::ErrorKind) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod operations;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
