//! Fixed-point arithmetic for pool calculations.
//!
//! This module provides [`Dec`], the 18-decimal fixed-point type every
//! pool formula is written in, the fractional [`pow`] routine built on it,
//! and [`CheckedArithmetic`] / [`mul_div`] for integer amounts.
//!
//! No floating point is used anywhere in the crate.

mod checked;
mod dec;
mod pow;

pub use checked::{mul_div, CheckedArithmetic};
pub use dec::{Dec, PRECISION};
pub use pow::pow;
