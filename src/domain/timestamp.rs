//! Block-time instants supplied by the caller.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

/// A point in time, in whole seconds since the Unix epoch.
///
/// The engine never reads a wall clock; every operation receives the
/// current `Timestamp` from its caller, which keeps re-execution
/// deterministic.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use weighted_pools::domain::Timestamp;
///
/// let t = Timestamp::from_secs(1_000);
/// assert_eq!(t.checked_add(Duration::from_secs(60)), Some(Timestamp::from_secs(1_060)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Creates a timestamp from seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Adds a duration, ignoring sub-second precision.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let secs = i64::try_from(duration.as_secs()).ok()?;
        self.0.checked_add(secs).map(Self)
    }

    /// Seconds elapsed from `earlier` to `self`, or `None` if `earlier` is later.
    #[must_use]
    pub fn secs_since(&self, earlier: Self) -> Option<u64> {
        let diff = self.0.checked_sub(earlier.0)?;
        u64::try_from(diff).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
