//! Statutory distribution engine
//!
//! Runs the separate-half step and then the registered orders in rank. The
//! first order with a beneficiary consumes everything that remains.

use crate::config::EngineConfig;
use crate::error::SuccessionResult;
use crate::forest::{HeirForest, HeirRecord};
use crate::orders::{OrderKind, OrderRegistry, SpouseShare, TopLevelHeirs};
use crate::representation::credit;
use heirshare_calculator::{divide_by_int, multiply, subtract};
use heirshare_types::{Fraction, ShareMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which step settled the estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinningOrder {
    Descendants,
    Parents,
    Grandparents,
    GreatGrandparents,
    /// A spouse took everything left because no line of the order was eligible
    SpouseOnly,
    /// Only the spouse's separate half was assigned; the rest is unassigned
    SeparateHalfOnly,
    /// Nobody inherits
    Escheat,
}

impl From<OrderKind> for WinningOrder {
    fn from(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Descendants => WinningOrder::Descendants,
            OrderKind::Parents => WinningOrder::Parents,
            OrderKind::Grandparents => WinningOrder::Grandparents,
            OrderKind::GreatGrandparents => WinningOrder::GreatGrandparents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    /// Every heir in the forest, zero when they take nothing
    pub shares: ShareMap,
    pub winning_order: WinningOrder,
    /// Part of the estate nobody takes (escheats to the state, not modelled)
    pub unassigned: Fraction,
}

pub struct StatutoryEngine {
    orders: OrderRegistry,
    config: EngineConfig,
}

impl Default for StatutoryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StatutoryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_orders(config, OrderRegistry::default())
    }

    pub fn with_orders(config: EngineConfig, orders: OrderRegistry) -> Self {
        Self { orders, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Initial statutory share of every heir reachable in `forest`.
    #[instrument(skip(self, forest), fields(heirs = forest.len()))]
    pub fn distribute(&self, forest: &HeirForest) -> SuccessionResult<Distribution> {
        let heirs = TopLevelHeirs::collect(forest)?;
        let mut shares: ShareMap = forest.ids().into_iter().map(|id| (id, Fraction::ZERO)).collect();
        let mut remaining = Fraction::ONE;

        let living_spouse = heirs.spouse.filter(|s| s.is_active());
        let separate_half = living_spouse.filter(|s| s.request_separate_half);
        if let Some(spouse) = separate_half {
            credit(&mut shares, spouse, Fraction::HALF)?;
            remaining = subtract(remaining, Fraction::HALF)?;
            debug!(spouse = %spouse.id, "spouse took the separate half");
        }
        if remaining.numerator <= 0 {
            return Ok(Distribution {
                shares,
                winning_order: WinningOrder::SeparateHalfOnly,
                unassigned: Fraction::ZERO,
            });
        }

        let spouse = match separate_half {
            Some(_) if self.config.spouse_half_excludes_orders => None,
            _ => living_spouse,
        };

        for order in self.orders.iter() {
            let lineage = order.lineage(&heirs);
            let lines = lineage.eligible_branches(forest);
            debug!(order = ?order.kind(), beneficiaries = lines.len(), spouse = spouse.is_some(), "evaluating order");

            match (order.spouse_share(), lines.is_empty(), spouse) {
                (SpouseShare::EqualLine, true, _) | (SpouseShare::Half, true, None) => continue,
                (SpouseShare::Half, true, Some(spouse)) => {
                    credit(&mut shares, spouse, remaining)?;
                    return Ok(settled(shares, WinningOrder::SpouseOnly));
                }
                (SpouseShare::EqualLine, false, spouse) => {
                    let count = lines.len() + usize::from(spouse.is_some());
                    let per_line = divide_by_int(remaining, count as i64)?;
                    if let Some(spouse) = spouse {
                        credit(&mut shares, spouse, per_line)?;
                    }
                    for line in lines {
                        line.distribute(forest, per_line, &mut shares)?;
                    }
                }
                (SpouseShare::Half, false, spouse) => {
                    let lines_share = match spouse {
                        Some(spouse) => {
                            let half = multiply(remaining, Fraction::HALF)?;
                            credit(&mut shares, spouse, half)?;
                            half
                        }
                        None => remaining,
                    };
                    lineage.distribute(forest, lines_share, &mut shares)?;
                }
            }
            return Ok(settled(shares, order.kind().into()));
        }

        self.fallback(shares, spouse, separate_half, remaining)
    }

    /// No order had a beneficiary.
    fn fallback(
        &self,
        mut shares: ShareMap,
        spouse: Option<&HeirRecord>,
        separate_half: Option<&HeirRecord>,
        remaining: Fraction,
    ) -> SuccessionResult<Distribution> {
        if let Some(spouse) = spouse {
            credit(&mut shares, spouse, remaining)?;
            return Ok(settled(shares, WinningOrder::SpouseOnly));
        }
        let winning_order = match separate_half {
            Some(_) => WinningOrder::SeparateHalfOnly,
            None => WinningOrder::Escheat,
        };
        debug!(unassigned = %remaining, "no statutory heir for the remaining estate");
        Ok(Distribution { shares, winning_order, unassigned: remaining })
    }
}

fn settled(shares: ShareMap, winning_order: WinningOrder) -> Distribution {
    Distribution { shares, winning_order, unassigned: Fraction::ZERO }
}

/// Initial statutory shares with the default orders and configuration.
pub fn compute_initial_shares(forest: &HeirForest) -> SuccessionResult<ShareMap> {
    Ok(StatutoryEngine::default().distribute(forest)?.shares)
}
