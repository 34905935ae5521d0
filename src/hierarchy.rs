use crate::diagnostics::Diagnostic;
use crate::model::{NodeId, NodeStore};
use tracing::warn;

/// Parent/child adjacency derived from the flat `parent_id` relation.
///
/// Nodes are addressed by their input-order position in the [`NodeStore`]
/// the index was built from. Children keep input order. The parent relation
/// is stored as given and may contain cycles; walking it is the visibility
/// resolver's job.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    diagnostics: Vec<Diagnostic>,
}

impl HierarchyIndex {
    pub fn build(store: &NodeStore) -> Self {
        let count = store.len();
        let mut parents = vec![None; count];
        let mut children = vec![Vec::new(); count];
        let mut diagnostics = Vec::new();

        for (pos, node) in store.nodes().iter().enumerate() {
            let resolved = match &node.parent_id {
                None => None,
                Some(parent_id) => match store.position(parent_id) {
                    Some(parent) if parent == pos => {
                        warn!(id = %node.id, "node is its own parent, shown as root");
                        diagnostics.push(Diagnostic::CycleDetected {
                            id: node.id.clone(),
                        });
                        None
                    }
                    Some(parent) => Some(parent),
                    None => {
                        warn!(id = %node.id, parent = %parent_id, "parent not found, shown as root");
                        diagnostics.push(Diagnostic::DanglingParent {
                            id: node.id.clone(),
                            parent_id: parent_id.clone(),
                        });
                        None
                    }
                },
            };

            if let Some(parent) = resolved {
                parents[pos] = Some(parent);
                children[parent].push(pos);
            }
        }

        Self {
            parents,
            children,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn parent_of(&self, pos: usize) -> Option<usize> {
        self.parents.get(pos).copied().flatten()
    }

    pub fn children_of(&self, pos: usize) -> &[usize] {
        self.children.get(pos).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, pos: usize) -> bool {
        !self.children_of(pos).is_empty()
    }

    /// Resolved parent id of `id`.
    pub fn parent_id<'a>(&self, store: &'a NodeStore, id: &NodeId) -> Option<&'a NodeId> {
        store
            .position(id)
            .and_then(|pos| self.parent_of(pos))
            .map(|parent| &store.nodes()[parent].id)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
