#![allow(dead_code)]

use mindweave::{
    loader, AppConfig, AppState, LayoutSettings, MindMapNode, NodeId, NodeStore, RenderFrame,
    Session,
};
use std::path::{Path, PathBuf};

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> NodeStore {
    loader::load_file(&fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {} should load: {}", name, e))
}

/// Root with children A and B; A has child A1.
pub fn sample_nodes() -> Vec<MindMapNode> {
    vec![
        MindMapNode::new(1, "Root", 1),
        MindMapNode::new(2, "A", 2).with_parent(1),
        MindMapNode::new(3, "B", 2).with_parent(1),
        MindMapNode::new(4, "A1", 3).with_parent(2),
    ]
}

pub fn sample_session() -> Session {
    Session::with_store(NodeStore::new(sample_nodes()), LayoutSettings::default())
}

pub fn app_with(store: NodeStore) -> AppState {
    let mut app = AppState::new(AppConfig::default());
    app.load(store);
    app
}

pub fn visible_ids(frame: &RenderFrame) -> Vec<String> {
    frame.nodes.iter().map(|n| n.id.to_string()).collect()
}

pub fn edge_pairs(frame: &RenderFrame) -> Vec<(String, String)> {
    frame
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

pub fn id(raw: i64) -> NodeId {
    NodeId::from(raw)
}
