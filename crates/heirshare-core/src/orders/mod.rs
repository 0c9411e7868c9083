//! Statutory orders of succession
//!
//! Each order describes its beneficiaries as a [`Lineage`]: a tree whose leaves
//! are heir lines (an heir plus their representation cascade) and whose inner
//! nodes split a share equally among the branches that can inherit. A branch
//! with no eligible line is skipped, so its share goes to its sibling.
//!
//! Orders are registered in statutory rank in an [`OrderRegistry`]; the engine
//! walks them in that rank and stops at the first one with a beneficiary.

pub mod descendants;
pub mod grandparents;
pub mod great_grandparents;
pub mod parents;

use crate::error::{SuccessionError, SuccessionResult};
use crate::forest::{HeirForest, HeirRecord};
use crate::representation::{can_inherit, distribute_line};
use heirshare_calculator::divide_by_int;
use heirshare_types::{Fraction, Relationship, ShareMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use descendants::DescendantsOrder;
pub use grandparents::GrandparentsOrder;
pub use great_grandparents::GreatGrandparentsOrder;
pub use parents::ParentsOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Descendants,
    Parents,
    Grandparents,
    GreatGrandparents,
}

/// How a surviving spouse takes part in an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpouseShare {
    /// The spouse counts as one more line, sharing equally with the others (Order I)
    EqualLine,
    /// The spouse takes half, the lines share the other half; with no eligible
    /// line the spouse takes everything that remains
    Half,
}

#[derive(Debug, Clone)]
pub enum Lineage<'f> {
    Line(&'f HeirRecord),
    Split(Vec<Lineage<'f>>),
}

impl<'f> Lineage<'f> {
    /// Equal split over the given top-level slots, skipping slots nobody fills.
    pub fn slots(heirs: &TopLevelHeirs<'f>, relationships: &[Relationship]) -> Self {
        Lineage::Split(
            relationships
                .iter()
                .filter_map(|rel| heirs.slot(*rel))
                .map(Lineage::Line)
                .collect(),
        )
    }

    pub fn lines(records: &[&'f HeirRecord]) -> Self {
        Lineage::Split(records.iter().map(|r| Lineage::Line(*r)).collect())
    }

    pub fn can_inherit(&self, forest: &HeirForest) -> bool {
        match self {
            Lineage::Line(heir) => can_inherit(forest, heir),
            Lineage::Split(branches) => branches.iter().any(|b| b.can_inherit(forest)),
        }
    }

    /// Branches directly below this node that can inherit.
    pub fn eligible_branches(&self, forest: &HeirForest) -> Vec<&Lineage<'f>> {
        match self {
            Lineage::Line(_) if self.can_inherit(forest) => vec![self],
            Lineage::Line(_) => Vec::new(),
            Lineage::Split(branches) => branches.iter().filter(|b| b.can_inherit(forest)).collect(),
        }
    }

    pub fn distribute(
        &self,
        forest: &HeirForest,
        share: Fraction,
        shares: &mut ShareMap,
    ) -> SuccessionResult<()> {
        match self {
            Lineage::Line(heir) => distribute_line(forest, heir, share, shares),
            Lineage::Split(_) => {
                let eligible = self.eligible_branches(forest);
                if eligible.is_empty() {
                    return Ok(());
                }
                let per_branch = divide_by_int(share, eligible.len() as i64)?;
                eligible.into_iter().try_for_each(|b| b.distribute(forest, per_branch, shares))
            }
        }
    }
}

/// A statutory order of succession.
pub trait SuccessionOrder: Send + Sync {
    fn kind(&self) -> OrderKind;

    fn spouse_share(&self) -> SpouseShare;

    /// The order's beneficiary tree, built from the top-level heirs.
    fn lineage<'f>(&self, heirs: &TopLevelHeirs<'f>) -> Lineage<'f>;
}

/// Orders in statutory rank.
pub struct OrderRegistry {
    orders: Vec<Box<dyn SuccessionOrder>>,
}

impl Default for OrderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(DescendantsOrder));
        registry.register(Box::new(ParentsOrder));
        registry.register(Box::new(GrandparentsOrder));
        registry.register(Box::new(GreatGrandparentsOrder));
        registry
    }
}

impl OrderRegistry {
    pub fn empty() -> Self {
        Self { orders: Vec::new() }
    }

    /// Appends an order below every order already registered.
    pub fn register(&mut self, order: Box<dyn SuccessionOrder>) {
        self.orders.push(order);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SuccessionOrder> {
        self.orders.iter().map(|o| o.as_ref())
    }

    pub fn kinds(&self) -> Vec<OrderKind> {
        self.iter().map(|o| o.kind()).collect()
    }
}

/// The top level of the forest, grouped by kinship. Only top-level heirs enter
/// the orders; nested heirs take part through representation.
#[derive(Debug)]
pub struct TopLevelHeirs<'f> {
    pub spouse: Option<&'f HeirRecord>,
    pub children: Vec<&'f HeirRecord>,
    pub parents: Vec<&'f HeirRecord>,
    slots: HashMap<Relationship, &'f HeirRecord>,
}

impl<'f> TopLevelHeirs<'f> {
    /// Groups the roots, rejecting a second spouse, a third parent or a second
    /// heir in any ancestor slot.
    pub fn collect(forest: &'f HeirForest) -> SuccessionResult<Self> {
        let mut heirs = Self {
            spouse: None,
            children: Vec::new(),
            parents: Vec::new(),
            slots: HashMap::new(),
        };
        for root in forest.roots() {
            match root.relationship {
                rel if rel.is_single_slot() => {
                    if let Some(existing) = heirs.slots.insert(rel, root) {
                        return Err(SuccessionError::Forest {
                            message: format!("{rel:?} is entered more than once"),
                            heir_id: Some(root.id.to_string()),
                            details: Some(format!("already held by '{}'", existing.id)),
                        });
                    }
                    if rel == Relationship::Spouse {
                        heirs.spouse = Some(root);
                    }
                }
                Relationship::Parent => {
                    if heirs.parents.len() == 2 {
                        return Err(SuccessionError::forest_at(
                            root.id.as_str(),
                            "a decedent has at most two parents",
                        ));
                    }
                    heirs.parents.push(root);
                }
                _ => heirs.children.push(root),
            }
        }
        Ok(heirs)
    }

    pub fn slot(&self, relationship: Relationship) -> Option<&'f HeirRecord> {
        self.slots.get(&relationship).copied()
    }
}
