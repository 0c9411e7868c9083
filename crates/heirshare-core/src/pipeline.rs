//! End-to-end calculation
//!
//! statutory distribution → redistribution → common denominator. Each run is
//! a pure function of the forest and the rules; nothing is cached between runs.

use crate::config::EngineConfig;
use crate::engine::{StatutoryEngine, WinningOrder};
use crate::error::SuccessionResult;
use crate::forest::HeirForest;
use crate::orders::OrderRegistry;
use crate::redistribution::apply_redistributions;
use chrono::{DateTime, Utc};
use heirshare_calculator::{FeeApportionment, apportion_fee, normalize};
use heirshare_types::{DonationRule, Fraction, Heir, RedistributionWarning, ShareMap};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Everything one calculation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessionReport {
    /// Statutory shares before any donation
    pub initial: ShareMap,
    pub final_shares: ShareMap,
    /// `final_shares` over one shared denominator
    pub common: ShareMap,
    pub warnings: Vec<RedistributionWarning>,
    pub winning_order: WinningOrder,
    pub unassigned: Fraction,
    pub computed_at: DateTime<Utc>,
}

impl SuccessionReport {
    /// Splits a fee or tax total in proportion to the common-denominator shares.
    pub fn apportion_fee(&self, total: Decimal) -> SuccessionResult<FeeApportionment> {
        Ok(apportion_fee(&self.common, total)?)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub struct SuccessionPipeline {
    engine: StatutoryEngine,
}

impl Default for SuccessionPipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SuccessionPipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { engine: StatutoryEngine::new(config) }
    }

    /// Pipeline with a custom set of succession orders.
    pub fn with_orders(config: EngineConfig, orders: OrderRegistry) -> Self {
        Self { engine: StatutoryEngine::with_orders(config, orders) }
    }

    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    #[instrument(skip_all, fields(heirs = forest.len(), rules = rules.len()))]
    pub fn run(&self, forest: &HeirForest, rules: &[DonationRule]) -> SuccessionResult<SuccessionReport> {
        let distribution = self.engine.distribute(forest)?;
        let outcome = apply_redistributions(&distribution.shares, rules, forest, self.config())?;
        let common = normalize(&outcome.final_shares)?;

        let report = SuccessionReport {
            initial: distribution.shares,
            final_shares: outcome.final_shares,
            common,
            warnings: outcome.warnings,
            winning_order: distribution.winning_order,
            unassigned: distribution.unassigned,
            computed_at: Utc::now(),
        };

        info!(
            heirs = forest.len(),
            rules = rules.len(),
            applied_donors = outcome.applied_donors.len(),
            warnings = report.warnings.len(),
            winning_order = ?report.winning_order,
            "Succession calculated"
        );
        Ok(report)
    }

    /// Builds the forest from the nested form with this pipeline's limits and runs it.
    pub fn run_heirs(&self, heirs: &[Heir], rules: &[DonationRule]) -> SuccessionResult<SuccessionReport> {
        let forest = HeirForest::from_heirs_with_config(heirs, self.config())?;
        self.run(&forest, rules)
    }
}

/// One-shot calculation with the default configuration.
pub fn calculate(heirs: &[Heir], rules: &[DonationRule]) -> SuccessionResult<SuccessionReport> {
    SuccessionPipeline::default().run_heirs(heirs, rules)
}
