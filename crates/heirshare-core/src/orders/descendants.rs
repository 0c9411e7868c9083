//! First order: the decedent's children, each child's line represented by
//! their issue when the child is predeceased. A surviving spouse shares
//! equally with the child lines.

use super::{Lineage, OrderKind, SpouseShare, SuccessionOrder, TopLevelHeirs};

#[derive(Debug, Default)]
pub struct DescendantsOrder;

impl SuccessionOrder for DescendantsOrder {
    fn kind(&self) -> OrderKind {
        OrderKind::Descendants
    }

    fn spouse_share(&self) -> SpouseShare {
        SpouseShare::EqualLine
    }

    fn lineage<'f>(&self, heirs: &TopLevelHeirs<'f>) -> Lineage<'f> {
        Lineage::lines(&heirs.children)
    }
}
