//! The one place that owns mutable mind-map state.
//!
//! Intent events mutate the session one at a time; the render surface then
//! asks for a fresh [`RenderFrame`]. Frames are never cached, so a frame can
//! never be out of date with respect to the state it was built from.

use crate::collapse::CollapseState;
use crate::diagnostics::Diagnostic;
use crate::edges::{self, Edge};
use crate::hierarchy::HierarchyIndex;
use crate::layout::{self, Bounds, LayoutEngine, LayoutNode, LayoutSettings};
use crate::model::{NodeId, NodeStore};
use crate::request::{RequestToken, RequestTracker};
use crate::visibility;
use tracing::debug;

/// Presentation state that is not part of the mind map itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub fullscreen: bool,
}

/// Everything the render surface needs for one redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
    pub fullscreen: bool,
}

impl RenderFrame {
    /// No nodes to draw; the surface shows its empty state instead.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        layout::bounds(&self.nodes)
    }

    pub fn node(&self, id: &NodeId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

/// Runs visibility, layout and edges for one state snapshot.
pub fn recompute(
    store: &NodeStore,
    index: &HierarchyIndex,
    collapse: &CollapseState,
    settings: &LayoutSettings,
    view: ViewState,
) -> RenderFrame {
    let visible = visibility::resolve(store, index, collapse);
    let nodes = LayoutEngine::new(*settings).compute_positions(store, index, &visible, collapse);
    let edges = edges::compute_edges(store, index, &visible);

    let diagnostics: Vec<Diagnostic> = store
        .diagnostics()
        .iter()
        .chain(index.diagnostics())
        .chain(visible.diagnostics())
        .cloned()
        .collect();

    debug!(
        nodes = store.len(),
        visible = nodes.len(),
        edges = edges.len(),
        collapsed = collapse.len(),
        diagnostics = diagnostics.len(),
        "recomputed frame"
    );

    RenderFrame {
        nodes,
        edges,
        diagnostics,
        fullscreen: view.fullscreen,
    }
}

#[derive(Debug, Default)]
pub struct Session {
    store: NodeStore,
    index: HierarchyIndex,
    collapse: CollapseState,
    view: ViewState,
    settings: LayoutSettings,
    requests: RequestTracker,
}

impl Session {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_store(store: NodeStore, settings: LayoutSettings) -> Self {
        let mut session = Self::new(settings);
        session.replace_nodes(store);
        session
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn collapse(&self) -> &CollapseState {
        &self.collapse
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Swaps in a new analysis result. Collapse state does not carry over.
    pub fn replace_nodes(&mut self, store: NodeStore) {
        self.index = HierarchyIndex::build(&store);
        self.store = store;
        self.collapse = CollapseState::new();
        debug!(nodes = self.store.len(), "node store replaced");
    }

    /// Returns false, leaving state untouched, when `id` is not a known node.
    pub fn toggle(&mut self, id: &NodeId) -> bool {
        if !self.store.contains(id) {
            debug!(id = %id, "toggle for unknown node ignored");
            return false;
        }
        self.collapse = self.collapse.toggle(id);
        true
    }

    pub fn expand_all(&mut self) {
        self.collapse = self.collapse.expand_all();
    }

    pub fn collapse_all(&mut self) {
        self.collapse = self.collapse.collapse_all(&self.store);
    }

    pub fn collapse_to_level(&mut self, level: u32) {
        self.collapse = self.collapse.collapse_to_level(&self.store, level);
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.view.fullscreen = fullscreen;
    }

    pub fn frame(&self) -> RenderFrame {
        recompute(
            &self.store,
            &self.index,
            &self.collapse,
            &self.settings,
            self.view,
        )
    }

    /// Marks the start of a new analysis request.
    pub fn begin_request(&mut self) -> RequestToken {
        self.requests.begin()
    }

    pub fn cancel_request(&mut self) {
        self.requests.cancel();
    }

    /// Installs `store` if `token` belongs to the latest request. Returns
    /// whether the response was applied.
    pub fn apply_response(&mut self, token: RequestToken, store: NodeStore) -> bool {
        match self.requests.accept(token, store) {
            Some(store) => {
                self.replace_nodes(store);
                true
            }
            None => false,
        }
    }
}
