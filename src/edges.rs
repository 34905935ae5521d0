use crate::hierarchy::HierarchyIndex;
use crate::model::{NodeId, NodeStore};
use crate::visibility::VisibleSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: format!("edge-{}-{}", source, target),
            source,
            target,
        }
    }
}

/// One edge per parent/child pair with both ends visible, in the input order
/// of the child.
///
/// Each node has at most one resolved parent, so no pair can repeat.
pub fn compute_edges(store: &NodeStore, index: &HierarchyIndex, visible: &VisibleSet) -> Vec<Edge> {
    visible
        .positions()
        .filter_map(|pos| {
            let parent = index.parent_of(pos)?;
            if !visible.is_visible(parent) {
                return None;
            }
            let nodes = store.nodes();
            Some(Edge::new(nodes[parent].id.clone(), nodes[pos].id.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapse::CollapseState;
    use crate::model::MindMapNode;
    use crate::visibility;

    fn edges_for(nodes: Vec<MindMapNode>, collapse: &CollapseState) -> Vec<Edge> {
        let store = NodeStore::new(nodes);
        let index = HierarchyIndex::build(&store);
        let visible = visibility::resolve(&store, &index, collapse);
        compute_edges(&store, &index, &visible)
    }

    fn sample() -> Vec<MindMapNode> {
        vec![
            MindMapNode::new(1, "Root", 1),
            MindMapNode::new(2, "A", 2).with_parent(1),
            MindMapNode::new(3, "B", 2).with_parent(1),
            MindMapNode::new(4, "A1", 3).with_parent(2),
        ]
    }

    #[test]
    fn test_edge_id_format() {
        let edge = Edge::new(NodeId::from("root"), NodeId::from(7));
        assert_eq!(edge.id, "edge-root-7");
    }

    #[test]
    fn test_all_edges_when_expanded() {
        let ids: Vec<_> = edges_for(sample(), &CollapseState::new())
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["edge-1-2", "edge-1-3", "edge-2-4"]);
    }

    #[test]
    fn test_collapsed_subtree_drops_edges() {
        let collapse = CollapseState::new().toggle(&NodeId::from(2));
        let ids: Vec<_> = edges_for(sample(), &collapse)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["edge-1-2", "edge-1-3"]);
    }

    #[test]
    fn test_dangling_parent_has_no_edge() {
        let edges = edges_for(
            vec![
                MindMapNode::new(1, "Root", 1),
                MindMapNode::new(5, "Orphan", 2).with_parent(99),
            ],
            &CollapseState::new(),
        );
        assert!(edges.is_empty());
    }

    #[test]
    fn test_cycle_edges_are_emitted_once() {
        let edges = edges_for(
            vec![
                MindMapNode::new("a", "A", 2).with_parent("b"),
                MindMapNode::new("b", "B", 2).with_parent("a"),
            ],
            &CollapseState::new(),
        );
        let ids: Vec<_> = edges.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["edge-b-a", "edge-a-b"]);
    }
}
