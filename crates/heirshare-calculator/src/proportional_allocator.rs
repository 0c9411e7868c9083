//! Proportional Fee Apportionment
//!
//! Splits a court fee (or any money amount) between heirs in proportion to
//! their common-denominator shares.
//!
//! amount(heir) = total * (numerator / denominator)
//!
//! Every heir gets zero when nobody holds a positive share.

use crate::error::{CalculatorError, CalculatorResult};
use heirshare_types::{HeirId, ShareMap};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Places kept in apportioned amounts.
const AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeApportionment {
    pub total: Decimal,
    pub amounts: BTreeMap<HeirId, Decimal>,
}

impl FeeApportionment {
    /// Sum of the rounded amounts; may differ from `total` by rounding cents.
    pub fn apportioned(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }
}

pub fn apportion_fee(shares: &ShareMap, total: Decimal) -> CalculatorResult<FeeApportionment> {
    if total.is_sign_negative() && !total.is_zero() {
        return Err(CalculatorError::NegativeAmount { amount: total });
    }

    let mut amounts = BTreeMap::new();
    for (id, share) in shares {
        if share.denominator <= 0 {
            return Err(CalculatorError::InvalidDenominator { fraction: *share });
        }
        let amount = if share.numerator > 0 {
            let scaled = total
                .checked_mul(Decimal::from(share.numerator))
                .ok_or(CalculatorError::Overflow { operation: "apportion" })?;
            scaled
                .checked_div(Decimal::from(share.denominator))
                .ok_or(CalculatorError::Overflow { operation: "apportion" })?
                .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };
        amounts.insert(id.clone(), amount);
    }

    Ok(FeeApportionment { total, amounts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use heirshare_types::Fraction;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn shares(entries: &[(&str, i64, i64)]) -> ShareMap {
        entries
            .iter()
            .map(|(id, n, d)| (HeirId::from(*id), Fraction::new(*n, *d)))
            .collect()
    }

    #[test]
    fn splits_by_share() {
        let result = apportion_fee(&shares(&[("a", 3, 6), ("b", 2, 6), ("c", 1, 6)]), dec("600"))
            .unwrap();
        assert_eq!(result.amounts["a"], dec("300"));
        assert_eq!(result.amounts["b"], dec("200"));
        assert_eq!(result.amounts["c"], dec("100"));
        assert_eq!(result.apportioned(), dec("600"));
    }

    #[test]
    fn rounds_to_cents() {
        let result = apportion_fee(&shares(&[("a", 1, 3), ("b", 2, 3)]), dec("100")).unwrap();
        assert_eq!(result.amounts["a"], dec("33.33"));
        assert_eq!(result.amounts["b"], dec("66.67"));
    }

    #[test]
    fn zero_shares_pay_nothing() {
        let result = apportion_fee(&shares(&[("a", 0, 4), ("b", 0, 4)]), dec("250")).unwrap();
        assert!(result.amounts.values().all(|a| a.is_zero()));
    }

    #[test]
    fn negative_total_is_rejected() {
        let err = apportion_fee(&shares(&[("a", 1, 1)]), dec("-1")).unwrap_err();
        assert!(matches!(err, CalculatorError::NegativeAmount { .. }));
    }
}
