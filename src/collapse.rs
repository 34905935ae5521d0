use crate::model::{NodeId, NodeStore};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Set of node ids whose subtrees are folded away.
///
/// A value type: every transition returns a new state and leaves the old one
/// untouched. Clones share storage until one of them is changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    collapsed: Arc<BTreeSet<NodeId>>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.collapsed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.collapsed.iter()
    }

    /// Collapses `id` if it is expanded, expands it otherwise.
    #[must_use]
    pub fn toggle(&self, id: &NodeId) -> Self {
        let mut next = self.clone();
        let set = Arc::make_mut(&mut next.collapsed);
        if !set.remove(id) {
            set.insert(id.clone());
        }
        next
    }

    #[must_use]
    pub fn expand_all(&self) -> Self {
        Self::default()
    }

    /// Collapses every non-root node. Roots stay expanded, so the map shows
    /// roots and their direct children.
    #[must_use]
    pub fn collapse_all(&self, store: &NodeStore) -> Self {
        self.collapse_to_level(store, 2)
    }

    /// Collapses every node at `level` or deeper. Level 1 folds the roots too,
    /// leaving only the roots on screen.
    #[must_use]
    pub fn collapse_to_level(&self, store: &NodeStore, level: u32) -> Self {
        let collapsed = store
            .nodes()
            .iter()
            .filter(|node| node.level >= level)
            .map(|node| node.id.clone())
            .collect();

        Self {
            collapsed: Arc::new(collapsed),
        }
    }
}

impl FromIterator<NodeId> for CollapseState {
    fn from_iter<T: IntoIterator<Item = NodeId>>(iter: T) -> Self {
        Self {
            collapsed: Arc::new(iter.into_iter().collect()),
        }
    }
}
