use crate::app::AppState;
use crate::model::NodeId;
use crate::ui::text::display_width;

use super::view::{center_active_node, map_size};

// Weight factor for prioritizing vertical movement over horizontal
// Higher value means vertical distance matters more
const VERTICAL_WEIGHT: f64 = 15.0;

// Cells kept between the active node and the viewport edge
const MARGIN: f64 = 2.0;

/// Scrolls just enough to keep the active node on screen.
pub fn ensure_node_visible(app: &mut AppState) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };
    let Some(node) = app.frame.node(&active_id) else {
        return;
    };

    let (col, row) = app.to_cell(node.x, node.y);
    let right = col + display_width(&node.label).min(app.config.max_label_width as usize) as f64;
    let (width, height) = map_size(app);

    if width <= MARGIN * 2.0 || height <= MARGIN * 2.0 {
        center_active_node(app);
        return;
    }

    if col < app.viewport_left + MARGIN {
        app.viewport_left = col - MARGIN;
    } else if right > app.viewport_left + width - MARGIN {
        app.viewport_left = right - width + MARGIN;
    }

    if row < app.viewport_top + MARGIN {
        app.viewport_top = row - MARGIN;
    } else if row + 1.0 > app.viewport_top + height - MARGIN {
        app.viewport_top = row + 1.0 - height + MARGIN;
    }
}

fn node_position(app: &AppState, id: &NodeId) -> Option<(f64, f64)> {
    app.frame.node(id).map(|node| (node.x, node.y))
}

/// Visible parent of `id`, read off the frame's edges.
fn visible_parent(app: &AppState, id: &NodeId) -> Option<NodeId> {
    app.frame
        .edges
        .iter()
        .find(|edge| &edge.target == id)
        .map(|edge| edge.source.clone())
}

fn visible_children(app: &AppState, id: &NodeId) -> Vec<NodeId> {
    app.frame
        .edges
        .iter()
        .filter(|edge| &edge.source == id)
        .map(|edge| edge.target.clone())
        .collect()
}

/// Nodes sharing the visible parent of `id`; for a top-level node, the other
/// top-level nodes of its level.
fn siblings(app: &AppState, id: &NodeId) -> Vec<NodeId> {
    match visible_parent(app, id) {
        Some(parent) => visible_children(app, &parent),
        None => {
            let level = app.frame.node(id).map(|n| n.level);
            app.frame
                .nodes
                .iter()
                .filter(|n| Some(n.level) == level && visible_parent(app, &n.id).is_none())
                .map(|n| n.id.clone())
                .collect()
        }
    }
}

// Find the nearest node in a specific direction using spatial distance
fn find_nearest_node_in_direction(
    app: &AppState,
    active_id: &NodeId,
    direction_x: f64,
    direction_y: f64,
) -> Option<NodeId> {
    let (current_x, current_y) = node_position(app, active_id)?;

    let mut best_distance = f64::MAX;
    let mut best_node = None;

    for node in &app.frame.nodes {
        if &node.id == active_id {
            continue;
        }

        let dx = node.x - current_x;
        let dy = node.y - current_y;

        let in_direction = (direction_x == 0.0 || dx * direction_x > 0.0)
            && (direction_y == 0.0 || dy * direction_y > 0.0);
        if !in_direction {
            continue;
        }

        let distance = if direction_y != 0.0 {
            (dy * VERTICAL_WEIGHT).powi(2) + dx.powi(2)
        } else {
            dy.powi(2) + dx.powi(2)
        };

        if distance < best_distance {
            best_distance = distance;
            best_node = Some(node.id.clone());
        }
    }

    best_node
}

fn move_vertically(app: &mut AppState, direction: f64) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };
    let Some((_, current_y)) = node_position(app, &active_id) else {
        return;
    };

    // Closest sibling in the requested direction first
    let mut best_sibling = None;
    let mut best_gap = f64::MAX;
    for sibling in siblings(app, &active_id) {
        if sibling == active_id {
            continue;
        }
        if let Some((_, y)) = node_position(app, &sibling) {
            let gap = (y - current_y) * direction;
            if gap > 0.0 && gap < best_gap {
                best_gap = gap;
                best_sibling = Some(sibling);
            }
        }
    }

    let target =
        best_sibling.or_else(|| find_nearest_node_in_direction(app, &active_id, 0.0, direction));
    if let Some(target) = target {
        app.active_node_id = Some(target);
        ensure_node_visible(app);
    }
}

pub fn go_up(app: &mut AppState) {
    move_vertically(app, -1.0);
}

pub fn go_down(app: &mut AppState) {
    move_vertically(app, 1.0);
}

pub fn go_left(app: &mut AppState) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };

    let target = visible_parent(app, &active_id)
        .or_else(|| find_nearest_node_in_direction(app, &active_id, -1.0, 0.0));
    if let Some(target) = target {
        app.active_node_id = Some(target);
        ensure_node_visible(app);
    }
}

pub fn go_right(app: &mut AppState) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };

    // Moving into a collapsed node opens it.
    let collapsed = app
        .frame
        .node(&active_id)
        .is_some_and(|node| node.collapsed && node.has_children);
    if collapsed {
        app.session.toggle(&active_id);
        app.refresh();
    }

    let Some((_, current_y)) = node_position(app, &active_id) else {
        return;
    };

    // Find the child closest to our vertical position
    let mut best_child = None;
    let mut best_distance = f64::MAX;
    for child in visible_children(app, &active_id) {
        if let Some((_, y)) = node_position(app, &child) {
            let distance = (y - current_y).abs();
            if distance < best_distance {
                best_distance = distance;
                best_child = Some(child);
            }
        }
    }

    if let Some(child) = best_child {
        app.active_node_id = Some(child);
        ensure_node_visible(app);
    }
}
