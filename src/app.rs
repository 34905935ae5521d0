use crate::config::AppConfig;
use crate::model::{NodeId, NodeStore};
use crate::session::{RenderFrame, Session};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Help,
}

pub struct AppState {
    pub running: bool,
    pub mode: AppMode,
    pub session: Session,
    /// Frame of the current session state, rebuilt by [`AppState::refresh`].
    pub frame: RenderFrame,
    pub active_node_id: Option<NodeId>,
    pub config: AppConfig,

    // Viewport state, in terminal cells
    pub viewport_top: f64,
    pub viewport_left: f64,
    pub terminal_width: u16,
    pub terminal_height: u16,

    // Message for status line
    pub message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut session = Session::new(config.layout_settings());
        session.set_fullscreen(config.start_fullscreen);

        let mut app = Self {
            running: true,
            mode: AppMode::Normal,
            session,
            frame: RenderFrame::default(),
            active_node_id: None,
            config,
            viewport_top: 0.0,
            viewport_left: 0.0,
            terminal_width: 80,
            terminal_height: 24,
            message: None,
        };
        app.refresh();
        app
    }

    pub fn load(&mut self, store: NodeStore) {
        self.session.replace_nodes(store);
        self.active_node_id = None;
        self.refresh();
    }

    /// Recomputes the frame after a state change and keeps the active node on
    /// a visible node. A hidden active node moves to its nearest visible
    /// ancestor.
    pub fn refresh(&mut self) {
        self.frame = self.session.frame();

        let mut candidate = self.active_node_id.clone();
        let mut steps = 0;
        while let Some(id) = candidate.take() {
            if self.frame.node(&id).is_some() {
                self.active_node_id = Some(id);
                return;
            }
            steps += 1;
            if steps > self.session.store().len() {
                break;
            }
            let store = self.session.store();
            candidate = self.session.index().parent_id(store, &id).cloned();
        }

        self.active_node_id = self.frame.nodes.first().map(|n| n.id.clone());
    }

    /// Terminal cell of a layout position, before the viewport offset.
    pub fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x / self.config.cell_width).round(),
            (y / self.config.cell_height).round(),
        )
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MindMapNode;

    fn create_test_app() -> AppState {
        let mut app = AppState::new(AppConfig::default());
        app.load(NodeStore::new(vec![
            MindMapNode::new(1, "Root", 1),
            MindMapNode::new(2, "A", 2).with_parent(1),
            MindMapNode::new(3, "A1", 3).with_parent(2),
        ]));
        app
    }

    #[test]
    fn test_new_app_is_empty() {
        let app = AppState::new(AppConfig::default());
        assert!(app.running);
        assert!(app.frame.is_empty());
        assert!(app.active_node_id.is_none());
    }

    #[test]
    fn test_load_selects_first_node() {
        let app = create_test_app();
        assert_eq!(app.active_node_id, Some(NodeId::from(1)));
        assert_eq!(app.frame.nodes.len(), 3);
    }

    #[test]
    fn test_hidden_active_node_moves_to_visible_ancestor() {
        let mut app = create_test_app();
        app.active_node_id = Some(NodeId::from(3));
        app.session.toggle(&NodeId::from(1));
        app.refresh();

        assert_eq!(app.active_node_id, Some(NodeId::from(1)));
    }

    #[test]
    fn test_start_fullscreen_from_config() {
        let config = AppConfig {
            start_fullscreen: true,
            ..AppConfig::default()
        };
        let app = AppState::new(config);
        assert!(app.frame.fullscreen);
    }

    #[test]
    fn test_to_cell() {
        let app = create_test_app();
        assert_eq!(app.to_cell(250.0, -60.0), (25.0, -2.0));
    }
}
