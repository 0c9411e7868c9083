//! Redistribution engine
//!
//! Heirs may hand their statutory share to other heirs. Each rule moves a
//! portion of the donor's *initial* share. A donor's rules only take effect
//! when their portions add up to exactly `1/1`; otherwise none of them apply
//! and a warning is reported.

use crate::config::{EngineConfig, UnknownHeirPolicy};
use crate::error::{SuccessionError, SuccessionResult};
use crate::forest::{HeirForest, HeirRecord};
use heirshare_calculator::{add, compare, multiply, simplify, subtract, sum};
use heirshare_types::{
    DonationRule, Fraction, HeirId, RedistributionWarning, RuleId, ShareMap, WarningKind,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedistributionOutcome {
    pub final_shares: ShareMap,
    pub warnings: Vec<RedistributionWarning>,
    /// Donors whose rules were applied, in order of first appearance
    pub applied_donors: Vec<HeirId>,
}

/// How much of a donor's share their rules already hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStatus {
    pub donor_id: HeirId,
    pub allocated: Fraction,
    /// `1 - allocated`; negative when over-allocated
    pub remaining: Fraction,
    pub is_complete: bool,
}

struct DonorGroup<'r> {
    donor_id: &'r HeirId,
    rules: Vec<&'r DonationRule>,
}

/// Problems that make a single rule unusable: self-donation, an unknown
/// recipient or a malformed portion. Zero and greater-than-one portions are
/// fine here; they only matter through the donor's sum.
fn rule_problem(rule: &DonationRule, initial: &ShareMap) -> Option<SuccessionError> {
    let portion = rule.portion_of_share;
    let invalid = |message: String| {
        SuccessionError::invalid_rule(
            rule.id.as_str(),
            rule.donor_id.as_str(),
            rule.recipient_id.as_str(),
            message,
        )
    };
    if rule.donor_id == rule.recipient_id {
        Some(invalid("an heir cannot donate to themselves".to_string()))
    } else if !initial.contains_key(&rule.recipient_id) {
        Some(SuccessionError::unknown_heir(rule.recipient_id.as_str(), &format!("rule {}", rule.id)))
    } else if portion.denominator <= 0 {
        Some(invalid(format!("portion {portion} needs a positive denominator")))
    } else if portion.numerator < 0 {
        Some(invalid(format!("portion {portion} is negative")))
    } else {
        None
    }
}

/// Fails under `Reject`; logs and drops the rule under `Ignore`.
fn enforce(err: SuccessionError, rule_id: &RuleId, policy: UnknownHeirPolicy) -> SuccessionResult<()> {
    match policy {
        UnknownHeirPolicy::Reject => Err(err),
        UnknownHeirPolicy::Ignore => {
            warn!(rule_id = %rule_id, error = %err, "ignoring donation rule");
            Ok(())
        }
    }
}

fn group_by_donor<'r>(rules: impl IntoIterator<Item = &'r DonationRule>) -> Vec<DonorGroup<'r>> {
    let mut groups: Vec<DonorGroup<'r>> = Vec::new();
    let mut positions: HashMap<&HeirId, usize> = HashMap::new();
    for rule in rules {
        let position = *positions.entry(&rule.donor_id).or_insert_with(|| {
            groups.push(DonorGroup { donor_id: &rule.donor_id, rules: Vec::new() });
            groups.len() - 1
        });
        groups[position].rules.push(rule);
    }
    groups
}

fn donor_name(forest: &HeirForest, donor_id: &HeirId) -> String {
    forest
        .get(donor_id.as_str())
        .map(|r| r.name.clone())
        .unwrap_or_else(|| format!("Donor ID: {donor_id}"))
}

/// Applies every donor's rules that allocate exactly their whole share.
///
/// A valid donor ends with zero plus whatever others hand to them; each
/// recipient gains `donor_initial * portion`. Heirs outside any valid rule keep
/// their initial share. The result covers exactly the ids of `initial`.
#[instrument(skip_all, fields(heirs = initial.len(), rules = rules.len()))]
pub fn apply_redistributions(
    initial: &ShareMap,
    rules: &[DonationRule],
    forest: &HeirForest,
    config: &EngineConfig,
) -> SuccessionResult<RedistributionOutcome> {
    let policy = config.unknown_heir_policy;
    let mut warnings = Vec::new();
    let mut valid: Vec<DonorGroup<'_>> = Vec::new();
    for group in group_by_donor(rules) {
        let Some(&donor_share) = initial.get(group.donor_id) else {
            for rule in &group.rules {
                let err = SuccessionError::unknown_heir(group.donor_id.as_str(), &format!("rule {}", rule.id));
                enforce(err, &rule.id, policy)?;
            }
            continue;
        };
        if !donor_share.is_positive() {
            debug!(donor = %group.donor_id, "donor holds no share; rules skipped");
            continue;
        }

        let mut admitted = Vec::with_capacity(group.rules.len());
        for rule in group.rules {
            match rule_problem(rule, initial) {
                None => admitted.push(rule),
                Some(err) => enforce(err, &rule.id, policy)?,
            }
        }
        if admitted.is_empty() {
            continue;
        }
        let group = DonorGroup { donor_id: group.donor_id, rules: admitted };

        let allocated = simplify(sum(group.rules.iter().map(|r| r.portion_of_share))?)?;
        if compare(allocated, Fraction::ONE)? == Ordering::Equal {
            valid.push(group);
            continue;
        }

        let name = donor_name(forest, group.donor_id);
        let warning = RedistributionWarning {
            kind: WarningKind::DonorIncompleteAllocation,
            donor_id: group.donor_id.clone(),
            message: format!(
                "{name} did not reassign exactly 100% of their share (allocated: {allocated}). \
                 Their donations will not be applied."
            ),
            donor_name: name,
            allocated,
        };
        if config.log_warnings {
            warn!(donor = %warning.donor_id, allocated = %allocated, "incomplete donor allocation");
        }
        warnings.push(warning);
    }

    let mut final_shares = initial.clone();
    for group in &valid {
        final_shares.insert(group.donor_id.clone(), Fraction::ZERO);
    }
    for group in &valid {
        let donor_share = initial[group.donor_id];
        for rule in &group.rules {
            let transfer = multiply(donor_share, rule.portion_of_share)?;
            let current = final_shares.get(&rule.recipient_id).copied().unwrap_or(Fraction::ZERO);
            final_shares.insert(rule.recipient_id.clone(), add(current, transfer)?);
        }
    }

    let final_shares = final_shares
        .into_iter()
        .map(|(id, share)| Ok((id, simplify(share)?)))
        .collect::<SuccessionResult<ShareMap>>()?;

    let applied_donors: Vec<HeirId> = valid.iter().map(|g| g.donor_id.clone()).collect();
    debug!(applied = applied_donors.len(), warnings = warnings.len(), "redistribution applied");
    Ok(RedistributionOutcome { final_shares, warnings, applied_donors })
}

/// Sum of a donor's portions and what is still free to allocate.
pub fn allocation_status(donor_id: &HeirId, rules: &[DonationRule]) -> SuccessionResult<AllocationStatus> {
    let allocated = sum(rules.iter().filter(|r| &r.donor_id == donor_id).map(|r| r.portion_of_share))?;
    let remaining = subtract(Fraction::ONE, allocated)?;
    Ok(AllocationStatus {
        donor_id: donor_id.clone(),
        allocated,
        remaining,
        is_complete: remaining.is_zero(),
    })
}

/// Heirs who may act as donors: alive, accepting, and holding a positive initial share.
pub fn eligible_donors<'f>(forest: &'f HeirForest, initial: &ShareMap) -> Vec<&'f HeirRecord> {
    forest
        .flatten()
        .into_iter()
        .filter(|heir| heir.is_active())
        .filter(|heir| initial.get(&heir.id).is_some_and(Fraction::is_positive))
        .collect()
}
