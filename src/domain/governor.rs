//! Future-governor descriptors attached to a pool at creation.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use super::coin::validate_denom;
use super::Address;
use crate::error::AmmError;

/// Who will govern the pool once governance is handed over.
///
/// Parsed from the descriptor string supplied at creation:
///
/// | Descriptor | Meaning |
/// |------------|---------|
/// | `""` | no future governor |
/// | `osmo1...` | a fixed account |
/// | `24h` | the largest holder of shares locked for at least 24h |
/// | `uatom,168h` | the largest holder of `uatom` locked for at least 168h |
///
/// Durations use Go-style unit suffixes (`h`, `m`, `s`, `ms`, `us`, `ns`)
/// and may be combined (`1h30m`).  A zero duration is allowed.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use weighted_pools::domain::FutureGovernor;
///
/// let Ok(g) = "uatom,2h".parse::<FutureGovernor>() else { panic!() };
/// assert_eq!(
///     g,
///     FutureGovernor::LockedDenom {
///         denom: "uatom".to_owned(),
///         duration: Duration::from_secs(7_200),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FutureGovernor {
    /// No governor is ever installed.
    #[default]
    None,
    /// A specific account.
    Account(Address),
    /// Largest holder of the pool's own shares locked for `duration`.
    LockedShares {
        /// Minimum lock duration.
        duration: Duration,
    },
    /// Largest holder of `denom` locked for `duration`.
    LockedDenom {
        /// Locked asset.
        denom: String,
        /// Minimum lock duration.
        duration: Duration,
    },
}

impl FromStr for FutureGovernor {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::None);
        }
        if Address::is_bech32_like(s) {
            return Ok(Self::Account(Address::new(s)));
        }
        let invalid = || AmmError::InvalidGovernor(s.to_owned());
        let mut parts = s.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(lock), None, None) => Ok(Self::LockedShares {
                duration: parse_duration(lock).ok_or_else(invalid)?,
            }),
            (Some(denom), Some(lock), None) => {
                validate_denom(denom).map_err(|_| invalid())?;
                Ok(Self::LockedDenom {
                    denom: denom.to_owned(),
                    duration: parse_duration(lock).ok_or_else(invalid)?,
                })
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for FutureGovernor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Account(addr) => write!(f, "{addr}"),
            Self::LockedShares { duration } => write!(f, "{}s", duration.as_secs()),
            Self::LockedDenom { denom, duration } => {
                write!(f, "{denom},{}s", duration.as_secs())
            }
        }
    }
}

/// Parses a Go-style duration (`"1h30m"`, `"90s"`, `"0"`).
///
/// Only unsigned integer components are accepted.
fn parse_duration(s: &str) -> Option<Duration> {
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }
    let mut total = Duration::ZERO;
    let mut rest = s;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit())?;
        if digits == 0 {
            return None;
        }
        let (number, tail) = rest.split_at(digits);
        let value: u64 = number.parse().ok()?;
        let unit_len = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);
        let component = match unit {
            "h" => Duration::from_secs(value.checked_mul(3_600)?),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "s" => Duration::from_secs(value),
            "ms" => Duration::from_millis(value),
            "us" | "µs" => Duration::from_micros(value),
            "ns" => Duration::from_nanos(value),
            _ => return None,
        };
        total = total.checked_add(component)?;
        rest = next;
    }
    Some(total)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_none() {
        assert_eq!("".parse::<FutureGovernor>(), Ok(FutureGovernor::None));
    }

    #[test]
    fn account() {
        let addr = "osmo1fqlr98d45v5ysqgp6h56kpujcj4cvsjnjq9nck";
        assert_eq!(
            addr.parse::<FutureGovernor>(),
            Ok(FutureGovernor::Account(Address::new(addr)))
        );
    }

    #[test]
    fn lock_duration_only() {
        assert_eq!(
            "1h30m".parse::<FutureGovernor>(),
            Ok(FutureGovernor::LockedShares {
                duration: Duration::from_secs(5_400)
            })
        );
        assert_eq!(
            "0".parse::<FutureGovernor>(),
            Ok(FutureGovernor::LockedShares {
                duration: Duration::ZERO
            })
        );
    }

    #[test]
    fn denom_and_duration() {
        let Ok(g) = "uatom,168h".parse::<FutureGovernor>() else {
            panic!("expected Ok");
        };
        assert_eq!(
            g,
            FutureGovernor::LockedDenom {
                denom: "uatom".to_owned(),
                duration: Duration::from_secs(168 * 3_600),
            }
        );
        assert_eq!(g.to_string(), "uatom,604800s");
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["a,b,c", "1x", "h", "1h,uatom", "uatom,", ",1h", "1.5h", "-1h"] {
            assert!(
                matches!(
                    bad.parse::<FutureGovernor>(),
                    Err(AmmError::InvalidGovernor(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn duration_components() {
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("1500ms"), Some(Duration::from_millis(1_500)));
        assert_eq!(parse_duration("2h2m2s"), Some(Duration::from_secs(7_322)));
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration(""), None);
    }
}
