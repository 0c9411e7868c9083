//! Display form of a share map: every share over one shared denominator.

use crate::arithmetic::{lcm_of, simplify};
use crate::error::{CalculatorError, CalculatorResult};
use heirshare_types::{Fraction, ShareMap};
use tracing::trace;

/// Rewrites every share over `D`, the LCM of the simplified denominators.
///
/// Zero shares become `0/D`. Values are preserved exactly; an empty map is
/// returned unchanged.
pub fn normalize(shares: &ShareMap) -> CalculatorResult<ShareMap> {
    let simplified = shares
        .iter()
        .map(|(id, share)| Ok((id.clone(), simplify(*share)?)))
        .collect::<CalculatorResult<ShareMap>>()?;

    let denominators: Vec<i64> = simplified.values().map(|f| f.denominator).collect();
    let common = lcm_of(&denominators)?;
    trace!(common_denominator = common, heirs = simplified.len(), "normalizing shares");

    simplified
        .into_iter()
        .map(|(id, share)| {
            if share.is_zero() {
                return Ok((id, Fraction::new(0, common)));
            }
            let numerator = share
                .numerator
                .checked_mul(common / share.denominator)
                .ok_or(CalculatorError::Overflow { operation: "normalize" })?;
            Ok((id, Fraction::new(numerator, common)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::compare;
    use heirshare_types::HeirId;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    fn shares(entries: &[(&str, i64, i64)]) -> ShareMap {
        entries
            .iter()
            .map(|(id, n, d)| (HeirId::from(*id), Fraction::new(*n, *d)))
            .collect()
    }

    #[test]
    fn half_and_third_share_sixths() {
        let normalized = normalize(&shares(&[("a", 1, 2), ("b", 1, 3)])).unwrap();
        assert_eq!(normalized["a"], Fraction::new(3, 6));
        assert_eq!(normalized["b"], Fraction::new(2, 6));
    }

    #[test]
    fn unsimplified_input_is_reduced_first() {
        let normalized = normalize(&shares(&[("a", 2, 4), ("b", 4, 8)])).unwrap();
        assert_eq!(normalized["a"], Fraction::new(1, 2));
        assert_eq!(normalized["b"], Fraction::new(1, 2));
    }

    #[test]
    fn zero_shares_take_common_denominator() {
        let normalized = normalize(&shares(&[("a", 1, 4), ("z", 0, 1)])).unwrap();
        assert_eq!(normalized["z"], Fraction::new(0, 4));
    }

    #[test]
    fn all_zero_and_empty_inputs() {
        let normalized = normalize(&shares(&[("a", 0, 1), ("b", 0, 5)])).unwrap();
        assert_eq!(normalized["a"], Fraction::ZERO);
        assert_eq!(normalized["b"], Fraction::ZERO);
        assert!(normalize(&ShareMap::new()).unwrap().is_empty());
    }

    #[test]
    fn invalid_share_is_rejected() {
        assert!(normalize(&shares(&[("a", 1, 0)])).is_err());
    }

    proptest! {
        #[test]
        fn values_are_preserved(parts in prop::collection::vec((0i64..50, 1i64..40), 1..8)) {
            let input: ShareMap = parts
                .iter()
                .enumerate()
                .map(|(i, (n, d))| (HeirId::new(format!("h{i}")), Fraction::new(*n, *d)))
                .collect();
            let normalized = normalize(&input).unwrap();
            let common = normalized.values().next().unwrap().denominator;
            for (id, share) in &normalized {
                prop_assert_eq!(share.denominator, common);
                prop_assert_eq!(compare(*share, input[id]).unwrap(), Ordering::Equal);
            }
        }
    }
}
