//! Fourth order: great-grandparents.
//!
//! Same shape as the third order one generation up: sides, then the two
//! grandparent pairs within a side, then the two slots within a pair.

use super::{Lineage, OrderKind, SpouseShare, SuccessionOrder, TopLevelHeirs};
use heirshare_types::Relationship::*;

#[derive(Debug, Default)]
pub struct GreatGrandparentsOrder;

impl SuccessionOrder for GreatGrandparentsOrder {
    fn kind(&self) -> OrderKind {
        OrderKind::GreatGrandparents
    }

    fn spouse_share(&self) -> SpouseShare {
        SpouseShare::Half
    }

    fn lineage<'f>(&self, heirs: &TopLevelHeirs<'f>) -> Lineage<'f> {
        let paternal = Lineage::Split(vec![
            Lineage::slots(heirs, &[PaternalGrandfatherFather, PaternalGrandfatherMother]),
            Lineage::slots(heirs, &[PaternalGrandmotherFather, PaternalGrandmotherMother]),
        ]);
        let maternal = Lineage::Split(vec![
            Lineage::slots(heirs, &[MaternalGrandfatherFather, MaternalGrandfatherMother]),
            Lineage::slots(heirs, &[MaternalGrandmotherFather, MaternalGrandmotherMother]),
        ]);
        Lineage::Split(vec![paternal, maternal])
    }
}
