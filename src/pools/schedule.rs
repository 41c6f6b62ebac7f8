//! Time-gated pool changes applied lazily on poke.
//!
//! A pool stores pending [`ScheduledChange`]s instead of being mutated by a
//! timer.  Whenever the registry hands out a pool it first calls
//! [`Pool::poke`](super::Pool::poke) with the caller's current time, which
//! applies every change that has come due.

use core::time::Duration;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FutureGovernor, Timestamp, Weight};
use crate::error::{AmmError, Result};

/// A pending state transition and the time it takes effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledChange {
    /// The pool starts accepting joins and exits.
    Activation {
        /// First instant at which the pool is active.
        effective_at: Timestamp,
    },
    /// The future governor takes over.
    GovernorHandover {
        /// Incoming governor.
        governor: FutureGovernor,
        /// Instant of the handover.
        effective_at: Timestamp,
    },
    /// Weights move linearly from `initial` to `target`.
    WeightTransition {
        /// Start of the transition.
        start: Timestamp,
        /// Length of the transition.
        duration: Duration,
        /// Weights at `start`, keyed by denom.
        initial: BTreeMap<String, Weight>,
        /// Weights at `start + duration`, keyed by denom.
        target: BTreeMap<String, Weight>,
    },
}

/// What applying a change at some instant produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Progress {
    /// Not due yet; keep it pending.
    Pending,
    /// Weights moved part-way; keep it pending.
    Partial(BTreeMap<String, Weight>),
    /// Fully applied; drop it.
    Done,
}

impl ScheduledChange {
    /// The instant from which this change has any effect.
    #[must_use]
    pub const fn effective_at(&self) -> Timestamp {
        match self {
            Self::Activation { effective_at } | Self::GovernorHandover { effective_at, .. } => {
                *effective_at
            }
            Self::WeightTransition { start, .. } => *start,
        }
    }

    /// Weights a transition prescribes at `now`, truncated toward zero.
    ///
    /// Returns `None` for the other change kinds or before `start`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the interpolation overflows.
    pub fn weights_at(&self, now: Timestamp) -> Result<Option<BTreeMap<String, Weight>>> {
        let Self::WeightTransition {
            start,
            duration,
            initial,
            target,
        } = self
        else {
            return Ok(None);
        };
        let Some(elapsed) = now.secs_since(*start) else {
            return Ok(None);
        };
        let total = duration.as_secs();
        if elapsed >= total {
            return Ok(Some(target.clone()));
        }
        let elapsed = i128::from(elapsed);
        let total = i128::from(total);
        let mut weights = BTreeMap::new();
        for (denom, to) in target {
            let from = initial.get(denom).copied().unwrap_or(*to);
            let delta = to
                .get()
                .checked_sub(from.get())
                .and_then(|d| d.checked_mul(elapsed))
                .ok_or(AmmError::Overflow("weight interpolation overflow"))?;
            let w = from
                .get()
                .checked_add(delta / total)
                .ok_or(AmmError::Overflow("weight interpolation overflow"))?;
            weights.insert(denom.clone(), Weight::new(w));
        }
        Ok(Some(weights))
    }

    /// Evaluates the change at `now`.
    pub(crate) fn progress(&self, now: Timestamp) -> Result<Progress> {
        if now < self.effective_at() {
            return Ok(Progress::Pending);
        }
        match self {
            Self::Activation { .. } | Self::GovernorHandover { .. } => Ok(Progress::Done),
            Self::WeightTransition {
                start, duration, ..
            } => {
                let Some(weights) = self.weights_at(now)? else {
                    return Ok(Progress::Pending);
                };
                let finished = now.secs_since(*start).is_some_and(|e| e >= duration.as_secs());
                if finished {
                    Ok(Progress::Done)
                } else {
                    Ok(Progress::Partial(weights))
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn weights(list: &[(&str, i128)]) -> BTreeMap<String, Weight> {
        list.iter()
            .map(|(d, w)| ((*d).to_owned(), Weight::new(*w)))
            .collect()
    }

    fn transition() -> ScheduledChange {
        ScheduledChange::WeightTransition {
            start: Timestamp::from_secs(100),
            duration: Duration::from_secs(100),
            initial: weights(&[("bar", 200), ("foo", 100)]),
            target: weights(&[("bar", 100), ("foo", 200)]),
        }
    }

    #[test]
    fn activation_becomes_due() {
        let change = ScheduledChange::Activation {
            effective_at: Timestamp::from_secs(50),
        };
        assert_eq!(change.progress(Timestamp::from_secs(49)), Ok(Progress::Pending));
        assert_eq!(change.progress(Timestamp::from_secs(50)), Ok(Progress::Done));
    }

    #[test]
    fn transition_interpolates_linearly() {
        let change = transition();
        assert_eq!(change.progress(Timestamp::from_secs(99)), Ok(Progress::Pending));
        assert_eq!(
            change.progress(Timestamp::from_secs(133)),
            Ok(Progress::Partial(weights(&[("bar", 167), ("foo", 133)])))
        );
        assert_eq!(change.progress(Timestamp::from_secs(200)), Ok(Progress::Done));
    }

    #[test]
    fn weights_at_end_are_target() {
        let Ok(Some(w)) = transition().weights_at(Timestamp::from_secs(1_000)) else {
            panic!("expected target weights");
        };
        assert_eq!(w, weights(&[("bar", 100), ("foo", 200)]));
    }

    #[test]
    fn other_changes_have_no_weights() {
        let change = ScheduledChange::GovernorHandover {
            governor: FutureGovernor::None,
            effective_at: Timestamp::EPOCH,
        };
        assert_eq!(change.weights_at(Timestamp::from_secs(10)), Ok(None));
    }
}
