//! Exact arithmetic for the heirshare succession engine.
//!
//! Shares are rationals and must stay exact: a donor's rules are only valid when
//! their portions add up to exactly `1/1`, so floating point is never used. All
//! operations are checked 64-bit arithmetic with 128-bit intermediates and return
//! a [`CalculatorError`] instead of falling back to zero.
//!
//! - [`arithmetic`]: simplify, add, subtract, multiply, divide, compare, LCM
//! - [`common_denominator`]: rewrite a share map over one shared denominator
//! - [`proportional_allocator`]: split a money amount by common-denominator shares

pub mod arithmetic;
pub mod common_denominator;
pub mod error;
pub mod proportional_allocator;

pub use arithmetic::{add, compare, divide_by_int, gcd, lcm, lcm_of, multiply, simplify, subtract, sum};
pub use common_denominator::normalize;
pub use error::{CalculatorError, CalculatorResult, ErrorCode};
pub use proportional_allocator::{FeeApportionment, apportion_fee};

pub use heirshare_types::{Fraction, HeirId, ShareMap};
