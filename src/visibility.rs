use crate::collapse::CollapseState;
use crate::diagnostics::Diagnostic;
use crate::hierarchy::HierarchyIndex;
use crate::model::{NodeId, NodeStore};
use tracing::warn;

/// Which nodes are currently on screen.
///
/// Derived from scratch on every pass and never stored between passes.
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    visible: Vec<bool>,
    diagnostics: Vec<Diagnostic>,
}

impl VisibleSet {
    pub fn is_visible(&self, pos: usize) -> bool {
        self.visible.get(pos).copied().unwrap_or(false)
    }

    pub fn contains(&self, store: &NodeStore, id: &NodeId) -> bool {
        store.position(id).is_some_and(|pos| self.is_visible(pos))
    }

    pub fn len(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions of visible nodes in input order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(pos, visible)| visible.then_some(pos))
    }

    pub fn ids<'a>(&'a self, store: &'a NodeStore) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.positions().map(move |pos| &store.nodes()[pos].id)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Decides for every node whether one of its ancestors is collapsed.
///
/// Each ancestor walk is bounded by the node count. A walk that runs past the
/// bound is on a parent cycle: the node is shown and a diagnostic recorded.
/// Results of walks that reach a root are cached for the rest of the pass,
/// so shared ancestor chains are only climbed once.
pub fn resolve(store: &NodeStore, index: &HierarchyIndex, collapse: &CollapseState) -> VisibleSet {
    let count = store.len();
    let collapsed: Vec<bool> = store
        .nodes()
        .iter()
        .map(|node| collapse.contains(&node.id))
        .collect();

    // hidden[pos] is only filled in for nodes whose chain ends at a root.
    let mut hidden: Vec<Option<bool>> = vec![None; count];
    let mut visible = vec![true; count];
    let mut diagnostics = Vec::new();
    let mut path = Vec::new();

    for pos in 0..count {
        if let Some(is_hidden) = hidden[pos] {
            visible[pos] = !is_hidden;
            continue;
        }

        path.clear();
        path.push(pos);
        let mut current = pos;

        let top = loop {
            if current != pos {
                if let Some(is_hidden) = hidden[current] {
                    break Some(is_hidden);
                }
            }
            match index.parent_of(current) {
                None => break Some(false),
                Some(parent) => {
                    if path.len() > count {
                        break None;
                    }
                    path.push(parent);
                    current = parent;
                }
            }
        };

        match top {
            Some(mut is_hidden) => {
                let last = path.len() - 1;
                hidden[path[last]] = Some(is_hidden);
                for i in (0..last).rev() {
                    is_hidden = is_hidden || collapsed[path[i + 1]];
                    hidden[path[i]] = Some(is_hidden);
                }
                visible[pos] = !is_hidden;
            }
            None => {
                // The node itself may show up again along the cycle; only
                // other ancestors can hide it.
                let behind_collapsed = path[1..].iter().any(|&a| a != pos && collapsed[a]);
                if behind_collapsed {
                    visible[pos] = false;
                } else {
                    let id = &store.nodes()[pos].id;
                    warn!(id = %id, bound = count, "ancestor walk exceeded bound, showing node");
                    diagnostics.push(Diagnostic::CycleDetected { id: id.clone() });
                    visible[pos] = true;
                }
            }
        }
    }

    VisibleSet {
        visible,
        diagnostics,
    }
}
