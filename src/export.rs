use crate::errors::AppResult;
use crate::model::NodeId;
use crate::session::RenderFrame;
use serde::Serialize;
use std::collections::HashMap;

const INDENT: &str = "  ";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
    pub fullscreen: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub level: u32,
    pub has_children: bool,
    pub collapsed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl From<&RenderFrame> for FrameDocument {
    fn from(frame: &RenderFrame) -> Self {
        Self {
            nodes: frame
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    id: n.id.to_string(),
                    label: n.label.clone(),
                    x: n.x,
                    y: n.y,
                    level: n.level,
                    has_children: n.has_children,
                    collapsed: n.collapsed,
                })
                .collect(),
            edges: frame
                .edges
                .iter()
                .map(|e| EdgeRecord {
                    id: e.id.clone(),
                    source: e.source.to_string(),
                    target: e.target.to_string(),
                })
                .collect(),
            fullscreen: frame.fullscreen,
        }
    }
}

pub fn to_json(frame: &RenderFrame) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&FrameDocument::from(frame))?)
}

/// Renders the visible part of the map as an indented outline.
///
/// Nodes that can be toggled carry `[-]` when expanded and `[+]` when
/// collapsed. Nodes only reachable through a parent cycle are listed at the
/// top level after the regular roots.
pub fn outline(frame: &RenderFrame) -> String {
    let positions: HashMap<&NodeId, usize> = frame
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (&n.id, i))
        .collect();

    let mut children: HashMap<&NodeId, Vec<usize>> = HashMap::new();
    let mut has_parent = vec![false; frame.nodes.len()];

    for edge in &frame.edges {
        if let Some(&pos) = positions.get(&edge.target) {
            children.entry(&edge.source).or_default().push(pos);
            has_parent[pos] = true;
        }
    }

    let mut out = String::new();
    let mut visited = vec![false; frame.nodes.len()];

    let (roots, rest): (Vec<usize>, Vec<usize>) =
        (0..frame.nodes.len()).partition(|&pos| !has_parent[pos]);

    for pos in roots.into_iter().chain(rest) {
        write_subtree(frame, &children, pos, 0, &mut visited, &mut out);
    }

    out
}

fn write_subtree(
    frame: &RenderFrame,
    children: &HashMap<&NodeId, Vec<usize>>,
    pos: usize,
    depth: usize,
    visited: &mut [bool],
    out: &mut String,
) {
    if visited[pos] {
        return;
    }
    visited[pos] = true;

    let node = &frame.nodes[pos];
    out.push_str(&INDENT.repeat(depth));
    if node.has_children {
        out.push_str(if node.collapsed { "[+] " } else { "[-] " });
    }
    out.push_str(&node.label);
    out.push('\n');

    if let Some(kids) = children.get(&node.id) {
        for &child in kids {
            write_subtree(frame, children, child, depth + 1, visited, out);
        }
    }
}
