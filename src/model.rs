use crate::diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Identifier of a mind-map node as produced by the analysis backend.
///
/// The backend emits either strings (`"root"`, `"node1_1"`) or integers.
/// Ids of different kinds never compare equal, so `"1"` and `1` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Number(n) => write!(f, "{}", n),
            NodeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Number(value)
    }
}

impl From<i32> for NodeId {
    fn from(value: i32) -> Self {
        NodeId::Number(i64::from(value))
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: NodeId,
    pub text: String,
    pub level: u32,
    pub parent_id: Option<NodeId>,
}

impl MindMapNode {
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_root_level(&self) -> bool {
        self.level <= 1
    }
}

/// The flat node list of one analysis result.
///
/// A store is never patched: a new analysis result replaces it wholesale.
/// Construction enforces id uniqueness (first occurrence wins) and strips
/// parents from level-1 nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<MindMapNode>,
    positions: HashMap<NodeId, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl NodeStore {
    pub fn new(nodes: Vec<MindMapNode>) -> Self {
        Self::with_diagnostics(nodes, Vec::new())
    }

    /// Builds a store, keeping diagnostics gathered while the nodes were parsed.
    pub fn with_diagnostics(nodes: Vec<MindMapNode>, mut diagnostics: Vec<Diagnostic>) -> Self {
        let mut kept = Vec::with_capacity(nodes.len());
        let mut positions = HashMap::with_capacity(nodes.len());

        for mut node in nodes {
            if positions.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate node id, keeping the first occurrence");
                diagnostics.push(Diagnostic::DuplicateId { id: node.id });
                continue;
            }

            if node.level == 0 {
                node.level = if node.parent_id.is_some() { 2 } else { 1 };
            }

            if node.level == 1 {
                if let Some(parent_id) = node.parent_id.take() {
                    warn!(id = %node.id, parent = %parent_id, "root node carried a parent, dropped");
                    diagnostics.push(Diagnostic::RootParentDropped {
                        id: node.id.clone(),
                        parent_id,
                    });
                }
            }

            positions.insert(node.id.clone(), kept.len());
            kept.push(node);
        }

        Self {
            nodes: kept,
            positions,
            diagnostics,
        }
    }

    pub fn nodes(&self) -> &[MindMapNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&MindMapNode> {
        self.position(id).map(|pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.positions.contains_key(id)
    }

    /// Input-order position of a node.
    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Finds a node by the plain string form of its id, as typed on the
    /// command line. A string id wins over a numeric one with the same text.
    pub fn lookup(&self, raw: &str) -> Option<&NodeId> {
        let text = NodeId::from(raw);
        if let Some(pos) = self.position(&text) {
            return Some(&self.nodes[pos].id);
        }
        let number = raw.trim().parse::<i64>().ok().map(NodeId::Number)?;
        self.position(&number).map(|pos| &self.nodes[pos].id)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
