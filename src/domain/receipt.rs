//! Result of a completed liquidity operation.

use serde::{Deserialize, Serialize};

use super::{Amount, Coins};

/// What a join or exit moved.
///
/// `shares` is the number of pool shares minted (joins) or burned (exits);
/// `tokens` are the reserve tokens that went into or out of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityReceipt {
    /// Pool the operation ran against.
    pub pool_id: u64,
    /// Shares minted or burned.
    pub shares: Amount,
    /// Reserve tokens deposited or withdrawn.
    pub tokens: Coins,
}
