//! Explicit rounding direction for integer and fixed-point division.

/// Rounding rule applied when a division discards a remainder.
///
/// Every division in the crate names its rounding rule.  Pool-favouring
/// directions are chosen per call site: deposits round required amounts
/// [`Up`](Self::Up), withdrawals round refunds [`Down`](Self::Down), and
/// intermediate fixed-point products use [`HalfEven`](Self::HalfEven).
///
/// # Examples
///
/// ```
/// use weighted_pools::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(!Rounding::HalfEven.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (truncation).
    Down,
    /// Round to nearest, ties to the even neighbour (banker's rounding).
    HalfEven,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Decides whether a truncated non-negative quotient must be bumped by
    /// one, given the remainder and the divisor it came from.
    #[must_use]
    pub(crate) fn bumps(
        &self,
        quotient_is_odd: bool,
        remainder_vs_half: core::cmp::Ordering,
        exact: bool,
    ) -> bool {
        if exact {
            return false;
        }
        match self {
            Self::Down => false,
            Self::Up => true,
            Self::HalfEven => match remainder_vs_half {
                core::cmp::Ordering::Less => false,
                core::cmp::Ordering::Greater => true,
                core::cmp::Ordering::Equal => quotient_is_odd,
            },
        }
    }
}
