//! Third order: grandparents.
//!
//! The share splits between the paternal and maternal side, then within a side
//! between grandfather and grandmother. A side with no eligible line leaves
//! its half to the other side.

use super::{Lineage, OrderKind, SpouseShare, SuccessionOrder, TopLevelHeirs};
use heirshare_types::Relationship;

const PATERNAL: [Relationship; 2] =
    [Relationship::PaternalGrandfather, Relationship::PaternalGrandmother];
const MATERNAL: [Relationship; 2] =
    [Relationship::MaternalGrandfather, Relationship::MaternalGrandmother];

#[derive(Debug, Default)]
pub struct GrandparentsOrder;

impl SuccessionOrder for GrandparentsOrder {
    fn kind(&self) -> OrderKind {
        OrderKind::Grandparents
    }

    fn spouse_share(&self) -> SpouseShare {
        SpouseShare::Half
    }

    fn lineage<'f>(&self, heirs: &TopLevelHeirs<'f>) -> Lineage<'f> {
        Lineage::Split(vec![Lineage::slots(heirs, &PATERNAL), Lineage::slots(heirs, &MATERNAL)])
    }
}
