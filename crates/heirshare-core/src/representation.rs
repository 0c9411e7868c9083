//! Right of representation
//!
//! A deceased heir's share passes to their descendants, split equally per
//! generation and per line. A line only counts when it ends in at least one
//! heir who actually takes something.

use crate::error::SuccessionResult;
use crate::forest::{HeirForest, HeirRecord};
use heirshare_calculator::{add, divide_by_int};
use heirshare_types::{Fraction, ShareMap};

/// A deceased heir "has issue" when some chain of deceased descendants below
/// them ends in an active heir. Living heirs never have issue, even if they
/// renounce.
pub fn has_issue(forest: &HeirForest, heir: &HeirRecord) -> bool {
    if heir.is_alive {
        return false;
    }
    let mut stack: Vec<&HeirRecord> = forest.children(heir).collect();
    while let Some(descendant) = stack.pop() {
        if descendant.is_active() {
            return true;
        }
        if !descendant.is_alive {
            stack.extend(forest.children(descendant));
        }
    }
    false
}

/// Whether `heir` takes part as a line: active personally, or represented.
pub fn can_inherit(forest: &HeirForest, heir: &HeirRecord) -> bool {
    heir.is_active() || has_issue(forest, heir)
}

pub(crate) fn credit(shares: &mut ShareMap, heir: &HeirRecord, amount: Fraction) -> SuccessionResult<()> {
    let current = shares.get(&heir.id).copied().unwrap_or(Fraction::ZERO);
    shares.insert(heir.id.clone(), add(current, amount)?);
    Ok(())
}

/// Gives `share` to the line headed by `heir`.
///
/// An active heir takes it personally. A deceased heir with issue has it split
/// equally among the descendants that can inherit, generation by generation.
/// Anything else receives nothing; callers only pass lines that can inherit.
pub fn distribute_line(
    forest: &HeirForest,
    heir: &HeirRecord,
    share: Fraction,
    shares: &mut ShareMap,
) -> SuccessionResult<()> {
    let mut pending = vec![(heir, share)];
    while let Some((current, share)) = pending.pop() {
        if current.is_active() {
            credit(shares, current, share)?;
            continue;
        }
        if !has_issue(forest, current) {
            continue;
        }
        let lines: Vec<&HeirRecord> =
            forest.children(current).filter(|d| can_inherit(forest, d)).collect();
        let per_line = divide_by_int(share, lines.len() as i64)?;
        pending.extend(lines.into_iter().rev().map(|line| (line, per_line)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heirshare_types::{Heir, Relationship};

    fn child(id: &str) -> Heir {
        Heir::new(id, id, Relationship::Child)
    }

    #[test]
    fn issue_requires_an_active_end_of_chain() {
        let forest = HeirForest::from_heirs(&[
            child("a").deceased().with_descendants(vec![child("a1").deceased()]),
            child("b").deceased().with_descendants(vec![child("b1").renouncing()]),
            child("c").deceased().with_descendants(vec![
                child("c1").deceased().with_descendants(vec![child("c11")]),
            ]),
            child("d").with_descendants(vec![child("d1")]),
        ])
        .unwrap();
        assert!(!has_issue(&forest, forest.get("a").unwrap()));
        assert!(!has_issue(&forest, forest.get("b").unwrap()));
        assert!(has_issue(&forest, forest.get("c").unwrap()));
        assert!(!has_issue(&forest, forest.get("d").unwrap()));
    }

    #[test]
    fn renouncing_living_heir_blocks_their_line() {
        let forest = HeirForest::from_heirs(&[child("a")
            .deceased()
            .with_descendants(vec![child("a1").renouncing().with_descendants(vec![child("a11")])])])
        .unwrap();
        assert!(!has_issue(&forest, forest.get("a").unwrap()));
    }

    #[test]
    fn split_is_per_line_per_generation() {
        let forest = HeirForest::from_heirs(&[child("p").deceased().with_descendants(vec![
            child("x"),
            child("y").deceased().with_descendants(vec![child("y1"), child("y2")]),
            child("z").deceased(),
        ])])
        .unwrap();
        let mut shares = ShareMap::new();
        distribute_line(&forest, forest.get("p").unwrap(), Fraction::ONE, &mut shares).unwrap();
        assert_eq!(shares["x"], Fraction::HALF);
        assert_eq!(shares["y1"], Fraction::new(1, 4));
        assert_eq!(shares["y2"], Fraction::new(1, 4));
        assert!(!shares.contains_key("z"));
    }
}
