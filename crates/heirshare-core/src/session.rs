//! Editable estate: an heir forest plus donation rules.
//!
//! Mirrors how a form drives the calculation. Every edit keeps the rules
//! consistent with the forest, and [`EstateSession::calculate`] reruns the
//! whole pipeline on a snapshot.

use crate::config::{EngineConfig, UnknownHeirPolicy};
use crate::error::{SuccessionError, SuccessionResult};
use crate::forest::{HeirForest, HeirRecord};
use crate::pipeline::{SuccessionPipeline, SuccessionReport};
use crate::redistribution::{AllocationStatus, allocation_status, eligible_donors};
use heirshare_types::{DonationRule, Heir, HeirId, RuleId};
use std::collections::HashSet;
use tracing::{debug, instrument};

pub struct EstateSession {
    forest: HeirForest,
    rules: Vec<DonationRule>,
    pipeline: SuccessionPipeline,
}

impl Default for EstateSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EstateSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            forest: HeirForest::with_config(&config),
            rules: Vec::new(),
            pipeline: SuccessionPipeline::new(config),
        }
    }

    pub fn forest(&self) -> &HeirForest {
        &self.forest
    }

    pub fn rules(&self) -> &[DonationRule] {
        &self.rules
    }

    pub fn add_heir(&mut self, heir: Heir) -> SuccessionResult<HeirId> {
        self.forest.add_heir(heir)
    }

    pub fn add_descendant(&mut self, parent_id: &HeirId, heir: Heir) -> SuccessionResult<HeirId> {
        self.forest.add_descendant(parent_id, heir)
    }

    /// Removes the heir's subtree and every rule naming a removed heir.
    #[instrument(skip(self))]
    pub fn remove_heir(&mut self, id: &HeirId) -> SuccessionResult<Vec<HeirId>> {
        let removed = self.forest.remove_heir(id)?;
        let gone: HashSet<&HeirId> = removed.iter().collect();
        let before = self.rules.len();
        self.rules
            .retain(|rule| !gone.contains(&rule.donor_id) && !gone.contains(&rule.recipient_id));
        debug!(pruned_rules = before - self.rules.len(), "pruned rules of removed heirs");
        Ok(removed)
    }

    /// Registers a rule whose donor and recipient are both in the forest.
    ///
    /// Whether the donor's rules add up to a whole share is only checked at
    /// calculation time, so rules can be entered one at a time.
    pub fn add_rule(&mut self, rule: DonationRule) -> SuccessionResult<RuleId> {
        if rule.donor_id == rule.recipient_id {
            return Err(SuccessionError::invalid_rule(
                rule.id.as_str(),
                rule.donor_id.as_str(),
                rule.recipient_id.as_str(),
                "an heir cannot donate to themselves",
            ));
        }
        for id in [&rule.donor_id, &rule.recipient_id] {
            if !self.forest.contains(id.as_str()) {
                return Err(SuccessionError::unknown_heir(id.as_str(), &format!("rule {}", rule.id)));
            }
        }
        if self.rules.iter().any(|r| r.id == rule.id) {
            return Err(SuccessionError::invalid_rule(
                rule.id.as_str(),
                rule.donor_id.as_str(),
                rule.recipient_id.as_str(),
                "rule id is already in use",
            ));
        }
        let id = rule.id.clone();
        self.rules.push(rule);
        Ok(id)
    }

    pub fn remove_rule(&mut self, id: &RuleId) -> Option<DonationRule> {
        let position = self.rules.iter().position(|r| &r.id == id)?;
        Some(self.rules.remove(position))
    }

    pub fn allocation_status(&self, donor_id: &HeirId) -> SuccessionResult<AllocationStatus> {
        if !self.forest.contains(donor_id.as_str())
            && self.pipeline.config().unknown_heir_policy == UnknownHeirPolicy::Reject
        {
            return Err(SuccessionError::unknown_heir(donor_id.as_str(), "allocation_status"));
        }
        allocation_status(donor_id, &self.rules)
    }

    /// Heirs the current statutory distribution makes eligible as donors.
    pub fn eligible_donors(&self) -> SuccessionResult<Vec<&HeirRecord>> {
        let report = self.pipeline.run(&self.forest, &[])?;
        Ok(eligible_donors(&self.forest, &report.initial))
    }

    pub fn calculate(&self) -> SuccessionResult<SuccessionReport> {
        self.pipeline.run(&self.forest, &self.rules)
    }
}
