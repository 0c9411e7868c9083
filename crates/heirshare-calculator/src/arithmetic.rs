//! Exact rational arithmetic over [`Fraction`].
//!
//! Every result is simplified: zero is `0/1`, the sign lives on the numerator
//! and the denominator is positive. Operands must already have a positive
//! denominator; only [`simplify`] accepts a negative one and normalizes it.

use crate::error::{CalculatorError, CalculatorResult};
use heirshare_types::Fraction;
use std::cmp::Ordering;

fn gcd_wide(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn checked_operand(fraction: Fraction) -> CalculatorResult<Fraction> {
    if fraction.denominator <= 0 {
        return Err(CalculatorError::InvalidDenominator { fraction });
    }
    Ok(fraction)
}

/// Reduces `numerator / denominator` and narrows it back to 64 bits.
/// `denominator` must be non-zero.
fn reduce(numerator: i128, denominator: i128, operation: &'static str) -> CalculatorResult<Fraction> {
    if numerator == 0 {
        return Ok(Fraction::ZERO);
    }
    let divisor = gcd_wide(numerator, denominator);
    let (mut numerator, mut denominator) = (numerator / divisor, denominator / divisor);
    if denominator < 0 {
        numerator = -numerator;
        denominator = -denominator;
    }
    let numerator = i64::try_from(numerator).map_err(|_| CalculatorError::overflow(operation))?;
    let denominator =
        i64::try_from(denominator).map_err(|_| CalculatorError::overflow(operation))?;
    Ok(Fraction::new(numerator, denominator))
}

/// Greatest common divisor of the absolute values. `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> CalculatorResult<i64> {
    i64::try_from(gcd_wide(a.into(), b.into())).map_err(|_| CalculatorError::overflow("gcd"))
}

/// Least common multiple of two positive integers.
pub fn lcm(a: i64, b: i64) -> CalculatorResult<i64> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let (a, b) = (i128::from(a).abs(), i128::from(b).abs());
    i64::try_from(a / gcd_wide(a, b) * b).map_err(|_| CalculatorError::overflow("lcm"))
}

/// LCM of every positive value in `values`. Non-positive values are ignored and
/// an empty (or all-ignored) input yields `1`.
pub fn lcm_of(values: &[i64]) -> CalculatorResult<i64> {
    values.iter().filter(|v| **v > 0).try_fold(1, |acc, v| lcm(acc, *v))
}

/// Canonical form of `fraction`. Idempotent.
pub fn simplify(fraction: Fraction) -> CalculatorResult<Fraction> {
    if fraction.denominator == 0 {
        return Err(CalculatorError::InvalidDenominator { fraction });
    }
    reduce(fraction.numerator.into(), fraction.denominator.into(), "simplify")
}

fn scaled_numerators(a: Fraction, b: Fraction) -> (i128, i128, i128) {
    let (ad, bd) = (i128::from(a.denominator), i128::from(b.denominator));
    let common = ad / gcd_wide(ad, bd) * bd;
    (
        i128::from(a.numerator) * (common / ad),
        i128::from(b.numerator) * (common / bd),
        common,
    )
}

/// `a + b` over the least common denominator, simplified.
pub fn add(a: Fraction, b: Fraction) -> CalculatorResult<Fraction> {
    let (a, b) = (checked_operand(a)?, checked_operand(b)?);
    let (an, bn, common) = scaled_numerators(a, b);
    let numerator = an.checked_add(bn).ok_or(CalculatorError::overflow("add"))?;
    reduce(numerator, common, "add")
}

/// `a - b`, simplified. The result may be negative.
pub fn subtract(a: Fraction, b: Fraction) -> CalculatorResult<Fraction> {
    let (a, b) = (checked_operand(a)?, checked_operand(b)?);
    let (an, bn, common) = scaled_numerators(a, b);
    let numerator = an.checked_sub(bn).ok_or(CalculatorError::overflow("subtract"))?;
    reduce(numerator, common, "subtract")
}

/// `a * b`, simplified.
pub fn multiply(a: Fraction, b: Fraction) -> CalculatorResult<Fraction> {
    let (a, b) = (checked_operand(a)?, checked_operand(b)?);
    reduce(
        i128::from(a.numerator) * i128::from(b.numerator),
        i128::from(a.denominator) * i128::from(b.denominator),
        "multiply",
    )
}

/// `fraction / divisor`. A zero divisor is an error, never a zero result.
pub fn divide_by_int(fraction: Fraction, divisor: i64) -> CalculatorResult<Fraction> {
    let fraction = checked_operand(fraction)?;
    if divisor == 0 {
        return Err(CalculatorError::DivisionByZero { fraction });
    }
    reduce(
        fraction.numerator.into(),
        i128::from(fraction.denominator) * i128::from(divisor),
        "divide",
    )
}

/// Orders two fractions by value. Fractions without a positive denominator
/// cannot be compared.
pub fn compare(a: Fraction, b: Fraction) -> CalculatorResult<Ordering> {
    let (a, b) = (checked_operand(a)?, checked_operand(b)?);
    let left = i128::from(a.numerator) * i128::from(b.denominator);
    let right = i128::from(b.numerator) * i128::from(a.denominator);
    Ok(left.cmp(&right))
}

/// Exact sum of a sequence of fractions; the empty sum is zero.
pub fn sum<I>(fractions: I) -> CalculatorResult<Fraction>
where
    I: IntoIterator<Item = Fraction>,
{
    fractions.into_iter().try_fold(Fraction::ZERO, add)
}
