//! Second order: the parents, each parent's line represented by their issue
//! (the decedent's siblings and their descendants).

use super::{Lineage, OrderKind, SpouseShare, SuccessionOrder, TopLevelHeirs};

#[derive(Debug, Default)]
pub struct ParentsOrder;

impl SuccessionOrder for ParentsOrder {
    fn kind(&self) -> OrderKind {
        OrderKind::Parents
    }

    fn spouse_share(&self) -> SpouseShare {
        SpouseShare::Half
    }

    fn lineage<'f>(&self, heirs: &TopLevelHeirs<'f>) -> Lineage<'f> {
        Lineage::lines(&heirs.parents)
    }
}
