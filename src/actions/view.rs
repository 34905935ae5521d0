use crate::app::{AppMode, AppState};
use crate::ui::text::display_width;

// Rows taken by the border and status line outside fullscreen.
const CHROME_ROWS: u16 = 3;
const CHROME_COLS: u16 = 2;

// Width reserved for the "[-] " marker in front of a label.
pub const MARKER_WIDTH: usize = 4;

pub fn toggle_collapse(app: &mut AppState) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };

    let has_children = app
        .frame
        .node(&active_id)
        .is_some_and(|node| node.has_children);
    if !has_children {
        app.set_message("Node has no children");
        return;
    }

    app.session.toggle(&active_id);
}

pub fn collapse_all(app: &mut AppState) {
    app.session.collapse_all();
}

pub fn expand_all(app: &mut AppState) {
    app.session.expand_all();
}

pub fn collapse_to_level(app: &mut AppState, level: u32) {
    app.session.collapse_to_level(level);
    app.set_message(format!("Collapsed to level {}", level));
}

pub fn show_help(app: &mut AppState) {
    app.mode = AppMode::Help;
}

pub fn close_help(app: &mut AppState) {
    app.mode = AppMode::Normal;
}

pub fn toggle_fullscreen(app: &mut AppState) {
    let fullscreen = !app.session.view().fullscreen;
    app.session.set_fullscreen(fullscreen);
}

/// Size of the map area in cells for the current view mode.
pub fn map_size(app: &AppState) -> (f64, f64) {
    if app.session.view().fullscreen {
        (app.terminal_width as f64, app.terminal_height as f64)
    } else {
        (
            app.terminal_width.saturating_sub(CHROME_COLS) as f64,
            app.terminal_height.saturating_sub(CHROME_ROWS) as f64,
        )
    }
}

/// Centers the viewport on the bounding box of the whole frame.
pub fn fit_to_view(app: &mut AppState) {
    let Some(bounds) = app.frame.bounds() else {
        return;
    };

    let (left, top) = app.to_cell(bounds.min_x, bounds.min_y);
    let (right, bottom) = app.to_cell(bounds.max_x, bounds.max_y);
    let label_width = app.config.max_label_width as f64 + MARKER_WIDTH as f64;

    let center_x = (left + right + label_width) / 2.0;
    let center_y = (top + bottom) / 2.0;
    let (width, height) = map_size(app);

    app.viewport_left = (center_x - width / 2.0).floor();
    app.viewport_top = (center_y - height / 2.0).floor();
}

pub fn center_active_node(app: &mut AppState) {
    let Some(active_id) = app.active_node_id.clone() else {
        return;
    };
    let Some(node) = app.frame.node(&active_id) else {
        return;
    };

    let (col, row) = app.to_cell(node.x, node.y);
    let half_label = display_width(&node.label).min(app.config.max_label_width as usize) as f64 / 2.0;
    let (width, height) = map_size(app);

    app.viewport_left = (col + half_label - width / 2.0).floor();
    app.viewport_top = (row - height / 2.0).floor();
}
