//! Engine-wide parameters supplied by governance.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Coin, Coins};
use crate::error::{AmmError, Result};

/// Parameters shared by every pool.
///
/// Loaded from TOML with [`ModuleParams::from_toml_str`]:
///
/// ```toml
/// [[pool_creation_fee]]
/// denom = "uosmo"
/// amount = 1000000000
/// ```
///
/// An empty or absent `pool_creation_fee` means pool creation is free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleParams {
    pool_creation_fee: Coins,
}

/// Wire shape of [`ModuleParams`]; amounts stay in `u64` so any TOML
/// integer maps onto them.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawModuleParams {
    #[serde(default)]
    pool_creation_fee: Vec<RawCoin>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawCoin {
    denom: String,
    amount: u64,
}

impl ModuleParams {
    /// Creates parameters charging `pool_creation_fee` on every new pool.
    #[must_use]
    pub const fn new(pool_creation_fee: Coins) -> Self {
        Self { pool_creation_fee }
    }

    /// Parses parameters from a TOML document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Config`] if the text is not valid TOML of the
    ///   expected shape.
    /// - [`AmmError::InvalidToken`] / [`AmmError::InvalidQuantity`] if a
    ///   fee coin is malformed, zero, or repeated.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawModuleParams = toml::from_str(text)
            .map_err(|e| AmmError::Config(format!("failed to parse params: {e}")))?;
        let fee = Coins::try_from_coins(
            raw.pool_creation_fee
                .into_iter()
                .map(|c| Coin::new(c.denom, Amount::from(c.amount))),
        )?;
        Ok(Self::new(fee))
    }

    /// Serializes the parameters back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Config`] if an amount does not fit the `u64`
    /// wire field or serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        let pool_creation_fee = self
            .pool_creation_fee
            .iter()
            .map(|(denom, amount)| {
                u64::try_from(amount.get())
                    .map(|amount| RawCoin {
                        denom: denom.to_owned(),
                        amount,
                    })
                    .map_err(|_| AmmError::Config(format!("fee amount {amount} exceeds u64")))
            })
            .collect::<Result<Vec<_>>>()?;
        toml::to_string(&RawModuleParams { pool_creation_fee })
            .map_err(|e| AmmError::Config(format!("failed to serialize params: {e}")))
    }

    /// Fee charged to the creator of every pool.
    #[must_use]
    pub const fn pool_creation_fee(&self) -> &Coins {
        &self.pool_creation_fee
    }
}
