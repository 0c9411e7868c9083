//! Arena-backed heir forest
//!
//! Heirs live in a flat slot vector addressed by index, with an id index for
//! lookups and explicit parent/child links. Nesting only encodes "child of the
//! enclosing heir" for representation; it carries no other kinship meaning.
//! All traversals use an explicit stack.

use crate::config::EngineConfig;
use crate::error::{SuccessionError, SuccessionResult};
use heirshare_types::{Heir, HeirId, Relationship};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

type Slot = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeirRecord {
    pub id: HeirId,
    pub name: String,
    pub relationship: Relationship,
    pub is_alive: bool,
    pub accepts_inheritance: bool,
    pub request_separate_half: bool,
    pub depth: usize,
    #[serde(skip)]
    parent: Option<Slot>,
    #[serde(skip)]
    children: Vec<Slot>,
}

impl HeirRecord {
    /// Alive and accepting: the heir can take a share personally.
    pub fn is_active(&self) -> bool {
        self.is_alive && self.accepts_inheritance
    }

    fn from_heir(heir: &Heir, id: HeirId, parent: Option<Slot>, depth: usize) -> Self {
        Self {
            id,
            name: heir.name.clone(),
            relationship: heir.relationship,
            is_alive: heir.is_alive,
            // a dead person cannot accept
            accepts_inheritance: heir.is_alive && heir.accepts_inheritance,
            request_separate_half: heir.request_separate_half,
            depth,
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeirForest {
    slots: Vec<Option<HeirRecord>>, // Tombstoned on removal, never reused
    index: HashMap<HeirId, Slot>,
    roots: Vec<Slot>,
    max_heirs: usize,
    max_depth: usize,
}

impl Default for HeirForest {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl HeirForest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            roots: Vec::new(),
            max_heirs: config.max_heirs,
            max_depth: config.max_depth,
        }
    }

    /// Builds a forest from the nested form using default limits.
    pub fn from_heirs(heirs: &[Heir]) -> SuccessionResult<Self> {
        Self::from_heirs_with_config(heirs, &EngineConfig::default())
    }

    pub fn from_heirs_with_config(heirs: &[Heir], config: &EngineConfig) -> SuccessionResult<Self> {
        let mut forest = Self::with_config(config);
        for heir in heirs {
            forest.add_heir(heir.clone())?;
        }
        Ok(forest)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&HeirRecord> {
        self.index.get(id).and_then(|slot| self.record(*slot))
    }

    fn record(&self, slot: Slot) -> Option<&HeirRecord> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn slots_to_records<'a>(&'a self, slots: &'a [Slot]) -> impl Iterator<Item = &'a HeirRecord> + 'a {
        slots.iter().filter_map(|slot| self.record(*slot))
    }

    /// Top-level heirs in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &HeirRecord> + '_ {
        self.slots_to_records(&self.roots)
    }

    /// Direct descendants of `record`, in insertion order.
    pub fn children<'a>(&'a self, record: &'a HeirRecord) -> impl Iterator<Item = &'a HeirRecord> + 'a {
        self.slots_to_records(&record.children)
    }

    pub fn descendants_of(&self, id: &str) -> SuccessionResult<Vec<&HeirRecord>> {
        let record = self.get(id).ok_or_else(|| SuccessionError::unknown_heir(id, "descendants_of"))?;
        Ok(self.children(record).collect())
    }

    pub fn parent_of(&self, id: &str) -> Option<&HeirRecord> {
        self.get(id).and_then(|r| r.parent).and_then(|slot| self.record(slot))
    }

    pub fn depth_of(&self, id: &str) -> Option<usize> {
        self.get(id).map(|r| r.depth)
    }

    /// Every heir in pre-order: a parent before its descendants, siblings in order.
    pub fn flatten(&self) -> Vec<&HeirRecord> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<Slot> = self.roots.iter().rev().copied().collect();
        while let Some(slot) = stack.pop() {
            if let Some(record) = self.record(slot) {
                out.push(record);
                stack.extend(record.children.iter().rev());
            }
        }
        out
    }

    pub fn ids(&self) -> Vec<HeirId> {
        self.flatten().into_iter().map(|r| r.id.clone()).collect()
    }

    /// Adds a top-level heir together with its nested descendants.
    #[instrument(skip(self, heir), fields(name = %heir.name))]
    pub fn add_heir(&mut self, heir: Heir) -> SuccessionResult<HeirId> {
        self.insert_subtree(heir, None)
    }

    /// Adds `heir` (and its nested descendants) under an existing heir.
    #[instrument(skip(self, heir), fields(parent = %parent_id))]
    pub fn add_descendant(&mut self, parent_id: &HeirId, heir: Heir) -> SuccessionResult<HeirId> {
        let parent = *self
            .index
            .get(parent_id)
            .ok_or_else(|| SuccessionError::unknown_heir(parent_id.as_str(), "add_descendant"))?;
        self.insert_subtree(heir, Some(parent))
    }

    /// Removes an heir and its whole subtree. Returns the removed ids in pre-order.
    #[instrument(skip(self))]
    pub fn remove_heir(&mut self, id: &HeirId) -> SuccessionResult<Vec<HeirId>> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| SuccessionError::unknown_heir(id.as_str(), "remove_heir"))?;

        let parent = self.record(slot).and_then(|r| r.parent);
        match parent {
            Some(parent) => {
                if let Some(Some(parent)) = self.slots.get_mut(parent) {
                    parent.children.retain(|child| *child != slot);
                }
            }
            None => self.roots.retain(|root| *root != slot),
        }

        let mut removed = Vec::new();
        let mut stack = vec![slot];
        while let Some(current) = stack.pop() {
            if let Some(record) = self.slots.get_mut(current).and_then(Option::take) {
                stack.extend(record.children.iter().rev());
                self.index.remove(&record.id);
                removed.push(record.id);
            }
        }
        debug!(removed = removed.len(), "removed heir subtree");
        Ok(removed)
    }

    /// Rebuilds the nested form.
    pub fn to_heirs(&self) -> Vec<Heir> {
        self.roots().map(|root| self.to_heir(root)).collect()
    }

    fn to_heir(&self, record: &HeirRecord) -> Heir {
        Heir {
            id: record.id.clone(),
            name: record.name.clone(),
            relationship: record.relationship,
            is_alive: record.is_alive,
            accepts_inheritance: record.accepts_inheritance,
            request_separate_half: record.request_separate_half,
            descendants: self.children(record).map(|child| self.to_heir(child)).collect(),
        }
    }

    /// Checks depth, id uniqueness and the size limit for a subtree about to be
    /// inserted. Returns the number of heirs it holds.
    fn validate_subtree(&self, heir: &Heir, base_depth: usize) -> SuccessionResult<usize> {
        let mut seen = HashSet::new();
        let mut count = 0usize;
        let mut stack = vec![(heir, base_depth)];
        while let Some((node, depth)) = stack.pop() {
            count += 1;
            if depth > self.max_depth {
                return Err(SuccessionError::forest_at(
                    node.id.as_str(),
                    format!("representation depth {depth} exceeds the limit of {}", self.max_depth),
                ));
            }
            if !node.id.is_empty() && (self.index.contains_key(&node.id) || !seen.insert(&node.id)) {
                return Err(SuccessionError::duplicate_heir(node.id.as_str()));
            }
            stack.extend(node.descendants.iter().map(|d| (d, depth + 1)));
        }
        if self.len() + count > self.max_heirs {
            return Err(SuccessionError::Forest {
                message: format!("forest would hold {} heirs, limit is {}", self.len() + count, self.max_heirs),
                heir_id: None,
                details: None,
            });
        }
        Ok(count)
    }

    /// Validates the whole subtree first so a failed insert leaves the forest untouched.
    fn insert_subtree(&mut self, heir: Heir, parent: Option<Slot>) -> SuccessionResult<HeirId> {
        let base_depth = match parent {
            Some(slot) => self.record(slot).map_or(0, |r| r.depth + 1),
            None => 0,
        };
        let count = self.validate_subtree(&heir, base_depth)?;

        let mut top_id = None;
        let mut stack = vec![(heir, parent, base_depth)];
        while let Some((mut node, parent, depth)) = stack.pop() {
            let id = if node.id.is_empty() { HeirId::generate() } else { node.id.clone() };
            let slot = self.slots.len();
            let descendants = std::mem::take(&mut node.descendants);
            self.slots.push(Some(HeirRecord::from_heir(&node, id.clone(), parent, depth)));
            self.index.insert(id.clone(), slot);
            match parent {
                Some(p) => {
                    if let Some(Some(record)) = self.slots.get_mut(p) {
                        record.children.push(slot);
                    }
                }
                None => self.roots.push(slot),
            }
            stack.extend(descendants.into_iter().rev().map(|d| (d, Some(slot), depth + 1)));
            if top_id.is_none() {
                top_id = Some(id);
            }
        }

        let id = top_id.ok_or_else(|| SuccessionError::forest("empty subtree"))?;
        debug!(heir_id = %id, heirs = count, "inserted heir subtree");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(id: &str) -> Heir {
        Heir::new(id, id.to_uppercase(), Relationship::Child)
    }

    fn sample() -> HeirForest {
        HeirForest::from_heirs(&[
            Heir::new("s", "Spouse", Relationship::Spouse),
            child("c1")
                .deceased()
                .with_descendants(vec![child("g1"), child("g2").with_descendants(vec![child("gg1")])]),
            child("c2"),
        ])
        .unwrap()
    }

    #[test]
    fn flatten_is_pre_order() {
        let forest = sample();
        let ids: Vec<&str> = forest.flatten().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["s", "c1", "g1", "g2", "gg1", "c2"]);
        assert_eq!(forest.len(), 6);
    }

    #[test]
    fn depth_and_parent_links() {
        let forest = sample();
        assert_eq!(forest.depth_of("gg1"), Some(2));
        assert_eq!(forest.parent_of("gg1").unwrap().id.as_str(), "g2");
        assert!(forest.parent_of("c1").is_none());
        let kids: Vec<_> = forest.descendants_of("c1").unwrap().iter().map(|r| r.id.clone()).collect();
        assert_eq!(kids, vec![HeirId::from("g1"), HeirId::from("g2")]);
    }

    #[test]
    fn add_descendant_by_id_at_any_depth() {
        let mut forest = sample();
        let id = forest.add_descendant(&HeirId::from("gg1"), child("ggg1").deceased()).unwrap();
        assert_eq!(forest.depth_of(id.as_str()), Some(3));
        assert!(!forest.get("ggg1").unwrap().accepts_inheritance);
        let err = forest.add_descendant(&HeirId::from("nobody"), child("x")).unwrap_err();
        assert!(matches!(err, SuccessionError::UnknownHeir { .. }));
    }

    #[test]
    fn dead_heirs_never_accept() {
        let mut heir = child("c9");
        heir.is_alive = false;
        heir.accepts_inheritance = true;
        let forest = HeirForest::from_heirs(&[heir]).unwrap();
        assert!(!forest.get("c9").unwrap().accepts_inheritance);
    }

    #[test]
    fn remove_takes_whole_subtree() {
        let mut forest = sample();
        let removed = forest.remove_heir(&HeirId::from("g2")).unwrap();
        assert_eq!(removed, vec![HeirId::from("g2"), HeirId::from("gg1")]);
        assert!(!forest.contains("gg1"));
        assert_eq!(forest.descendants_of("c1").unwrap().len(), 1);

        forest.remove_heir(&HeirId::from("c1")).unwrap();
        let roots: Vec<_> = forest.roots().map(|r| r.id.as_str().to_string()).collect();
        assert_eq!(roots, ["s", "c2"]);
        assert!(forest.remove_heir(&HeirId::from("c1")).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected_atomically() {
        let mut forest = sample();
        let err = forest
            .add_heir(child("new").with_descendants(vec![child("g1")]))
            .unwrap_err();
        assert!(matches!(err, SuccessionError::DuplicateHeir { .. }));
        assert!(!forest.contains("new"));
    }

    #[test]
    fn empty_ids_are_generated() {
        let mut forest = HeirForest::new();
        let id = forest.add_heir(Heir::new("", "Anon", Relationship::Parent)).unwrap();
        assert!(!id.is_empty());
        assert!(forest.contains(id.as_str()));
    }

    #[test]
    fn limits_are_enforced() {
        let config = EngineConfig { max_heirs: 2, max_depth: 1, ..EngineConfig::default() };
        let mut forest = HeirForest::with_config(&config);
        let deep = child("a").with_descendants(vec![child("b").with_descendants(vec![child("c")])]);
        assert!(matches!(forest.add_heir(deep), Err(SuccessionError::Forest { .. })));
        forest.add_heir(child("a")).unwrap();
        forest.add_heir(child("b")).unwrap();
        assert!(forest.add_heir(child("c")).is_err());
    }

    #[test]
    fn nested_round_trip() {
        let forest = sample();
        let rebuilt = HeirForest::from_heirs(&forest.to_heirs()).unwrap();
        let before: Vec<_> = forest.flatten().into_iter().cloned().collect();
        let after: Vec<_> = rebuilt.flatten().into_iter().cloned().collect();
        assert_eq!(before, after);
    }
}
