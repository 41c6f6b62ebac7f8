//! Fixed-point exponentiation with a fractional exponent.
//!
//! `pow(b, e)` splits the exponent into its integer part `n` and
//! fractional part `f` and returns `b^n * b^f`:
//!
//! - `b^n` comes from [`Dec::power`] (repeated squaring).
//! - `b^f` comes from the binomial series
//!   `(1 + x)^f = Σ C(f, k) x^k` with `x = b - 1`, summed until a term
//!   drops below `10^-8`.
//!
//! The series converges for `|x| < 1`, which is why the base is restricted
//! to `(0, 2)`.  Every step rounds exactly like [`Dec`] does, so the result
//! is reproducible bit-for-bit.

use alloy_primitives::U256;

use super::Dec;
use crate::error::{AmmError, Result};

/// Series terms below `10^-8` end the summation.
const POW_PRECISION: Dec = Dec::from_atoms(U256::from_limbs([10_000_000_000, 0, 0, 0]));

/// Raises `base` to a non-negative fractional `exp`.
///
/// # Errors
///
/// - [`AmmError::PowOutOfDomain`] if `base` is not in `(0, 2)` or `exp`
///   is negative.
/// - [`AmmError::Overflow`] if an intermediate value overflows.
///
/// # Examples
///
/// ```
/// use weighted_pools::math::{pow, Dec};
///
/// let (Ok(base), Ok(exp)) = ("1.2".parse::<Dec>(), "2".parse::<Dec>()) else { panic!() };
/// assert_eq!(pow(base, exp).map(|d| d.to_string()), Ok("1.440000000000000000".to_owned()));
/// ```
pub fn pow(base: Dec, exp: Dec) -> Result<Dec> {
    if !base.is_positive() {
        return Err(AmmError::PowOutOfDomain("base must be greater than zero"));
    }
    if base >= Dec::from_int(2) {
        return Err(AmmError::PowOutOfDomain("base must be less than two"));
    }
    if exp.is_negative() {
        return Err(AmmError::PowOutOfDomain("exponent must not be negative"));
    }

    let whole = exp.trunc();
    let fractional = exp.checked_sub(&whole)?;
    let whole_pow = base.power(whole.truncate_u64()?)?;
    if fractional.is_zero() {
        return Ok(whole_pow);
    }
    let fractional_pow = pow_approx(base, fractional)?;
    whole_pow.checked_mul(&fractional_pow)
}

/// Binomial-series approximation of `base^exp` for `0 <= exp < 1`.
fn pow_approx(base: Dec, exp: Dec) -> Result<Dec> {
    if exp.is_zero() {
        return Ok(Dec::ONE);
    }
    let (x, x_negative) = base.abs_diff(&Dec::ONE)?;

    let mut term = Dec::ONE;
    let mut sum = Dec::ONE;
    let mut negative = false;
    let mut prev_k = Dec::ZERO;
    let mut i: i128 = 1;

    // term_k = term_{k-1} * (exp - (k - 1)) * x / k
    while term >= POW_PRECISION {
        let (c, c_negative) = exp.abs_diff(&prev_k)?;
        let k = Dec::from_int(i);
        term = term.checked_mul(&c)?.checked_mul(&x)?.checked_quo(&k)?;
        if term.is_zero() {
            break;
        }
        if x_negative {
            negative = !negative;
        }
        if c_negative {
            negative = !negative;
        }
        sum = if negative {
            sum.checked_sub(&term)?
        } else {
            sum.checked_add(&term)?
        };
        prev_k = k;
        i += 1;
    }
    Ok(sum)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        let Ok(d) = s.parse::<Dec>() else {
            panic!("bad literal {s}");
        };
        d
    }

    fn pow_str(base: &str, exp: &str) -> String {
        let Ok(r) = pow(dec(base), dec(exp)) else {
            panic!("pow({base}, {exp}) failed");
        };
        r.to_string()
    }

    // -- domain ---------------------------------------------------------------

    #[test]
    fn rejects_base_outside_zero_two() {
        for base in ["0", "-0.5", "2", "2.5"] {
            let Err(AmmError::PowOutOfDomain(_)) = pow(dec(base), Dec::ONE) else {
                panic!("base {base} should be rejected");
            };
        }
    }

    #[test]
    fn rejects_negative_exponent() {
        let Err(AmmError::PowOutOfDomain(_)) = pow(dec("1.5"), dec("-1")) else {
            panic!("expected PowOutOfDomain");
        };
    }

    // -- values ---------------------------------------------------------------

    #[test]
    fn zero_exponent_is_one() {
        assert_eq!(pow_str("1.7", "0"), "1.000000000000000000");
    }

    #[test]
    fn integer_exponent_is_exact() {
        assert_eq!(pow_str("1.2", "2"), "1.440000000000000000");
    }

    #[test]
    fn cube_root_of_one_point_two() {
        // weight 100 of a 100/200 pool
        assert_eq!(pow_str("1.2", "0.333333333333333333"), "1.062658570200994404");
    }

    #[test]
    fn fractional_exponents() {
        assert_eq!(pow_str("0.5", "1.5"), "0.353553393461689042");
        assert_eq!(pow_str("1.5", "0.5"), "1.224744873486002860");
    }

    #[test]
    fn base_one_is_fixed_point() {
        assert_eq!(pow_str("1", "0.75"), "1.000000000000000000");
    }
}
