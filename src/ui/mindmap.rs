use crate::app::AppState;
use crate::layout::LayoutNode;
use crate::model::NodeId;
use crate::ui::canvas::BufferCanvas;
use crate::ui::constants::{level_color, link, COLLAPSED_MARKER, EMPTY_STATE, EXPANDED_MARKER};
use crate::ui::text::{display_width, TextFitter};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashMap;

/// A node projected onto the canvas.
struct Placed {
    x: i64,
    y: i64,
    text: String,
    width: i64,
}

// Mind map renderer
pub struct MindMapRenderer<'a> {
    app: &'a AppState,
}

impl<'a> MindMapRenderer<'a> {
    pub fn new(app: &'a AppState) -> Self {
        Self { app }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.app.frame.is_empty() {
            let y = area.y + area.height / 2;
            let line = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
            let paragraph = Paragraph::new(EMPTY_STATE)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, line);
            return;
        }

        let canvas = self.draw(area.width as usize, area.height as usize);
        frame.render_widget(Paragraph::new(canvas.to_lines()), area);
    }

    /// Draws connectors first, then labels on top of them.
    pub fn draw(&self, width: usize, height: usize) -> BufferCanvas {
        let mut canvas = BufferCanvas::new(width, height);
        let placed = self.place_nodes();

        for edge in &self.app.frame.edges {
            if let (Some(parent), Some(child)) = (placed.get(&edge.source), placed.get(&edge.target)) {
                Self::draw_connector(&mut canvas, parent, child);
            }
        }
        canvas.resolve_links(Style::default().fg(Color::DarkGray));

        for node in &self.app.frame.nodes {
            if let Some(p) = placed.get(&node.id) {
                canvas.draw_styled_text(p.x, p.y, &p.text, self.node_style(node));
            }
        }

        canvas
    }

    fn place_nodes(&self) -> HashMap<NodeId, Placed> {
        let max_width = self.app.config.max_label_width as usize;

        self.app
            .frame
            .nodes
            .iter()
            .map(|node| {
                let (col, row) = self.app.to_cell(node.x, node.y);
                let marker = match (node.has_children, node.collapsed) {
                    (false, _) => "",
                    (true, false) => EXPANDED_MARKER,
                    (true, true) => COLLAPSED_MARKER,
                };
                let text = format!("{}{}", marker, TextFitter::fit(&node.label, max_width));
                let placed = Placed {
                    // Saturates for far-off nodes; the connector clips them.
                    x: (col - self.app.viewport_left) as i64,
                    y: (row - self.app.viewport_top) as i64,
                    width: display_width(&text) as i64,
                    text,
                };
                (node.id.clone(), placed)
            })
            .collect()
    }

    /// Elbow from the end of the parent's label to the start of the child's.
    /// Only the part inside the canvas is walked.
    fn draw_connector(canvas: &mut BufferCanvas, parent: &Placed, child: &Placed) {
        let (width, height) = (canvas.width as i64, canvas.height as i64);
        let start = parent.x.saturating_add(parent.width).saturating_add(1);
        let elbow = child.x.saturating_sub(2).max(start);
        let (py, cy) = (parent.y, child.y);

        for x in start.max(0)..elbow.min(width) {
            canvas.link(x, py, link::LEFT | link::RIGHT);
        }

        if cy == py {
            canvas.link(elbow, py, link::LEFT | link::RIGHT);
        } else {
            let (toward_child, toward_parent) = if cy > py {
                (link::DOWN, link::UP)
            } else {
                (link::UP, link::DOWN)
            };
            canvas.link(elbow, py, link::LEFT | toward_child);
            if (0..width).contains(&elbow) {
                let top = py.min(cy).saturating_add(1).max(0);
                for y in top..py.max(cy).min(height) {
                    canvas.link(elbow, y, link::UP | link::DOWN);
                }
            }
            canvas.link(elbow, cy, toward_parent | link::RIGHT);
        }

        for x in elbow.saturating_add(1).max(0)..child.x.min(width) {
            canvas.link(x, cy, link::LEFT | link::RIGHT);
        }
    }

    fn node_style(&self, node: &LayoutNode) -> Style {
        let color = level_color(node.level);
        if self.app.active_node_id.as_ref() == Some(&node.id) {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else if node.level <= 1 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    }
}
