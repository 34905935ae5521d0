mod clipboard;
mod movement;
mod view;

use crate::app::AppState;
use anyhow::Result;

// Re-export all public functions from submodules
pub use clipboard::*;
pub use movement::*;
pub use view::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Application control
    Quit,

    // Movement
    GoUp,
    GoDown,
    GoLeft,
    GoRight,

    // Collapse state
    ToggleCollapse,
    CollapseAll,
    ExpandAll,
    CollapseToLevel(u32),

    // View control
    ToggleFullscreen,
    FitToView,

    // Clipboard
    YankNode,

    // Help
    ShowHelp,
    CloseHelp,
}

/// Applies one intent and rebuilds the frame before the next draw.
pub fn execute_action(action: Action, app: &mut AppState) -> Result<()> {
    app.clear_message();

    match action {
        Action::Quit => {
            app.running = false;
        }

        // Movement actions
        Action::GoUp => movement::go_up(app),
        Action::GoDown => movement::go_down(app),
        Action::GoLeft => movement::go_left(app),
        Action::GoRight => movement::go_right(app),

        // Collapse state
        Action::ToggleCollapse => view::toggle_collapse(app),
        Action::CollapseAll => view::collapse_all(app),
        Action::ExpandAll => view::expand_all(app),
        Action::CollapseToLevel(level) => view::collapse_to_level(app, level),

        // View control
        Action::ToggleFullscreen => view::toggle_fullscreen(app),
        Action::FitToView => view::fit_to_view(app),

        // Clipboard
        Action::YankNode => clipboard::yank_node(app)?,

        // Help
        Action::ShowHelp => view::show_help(app),
        Action::CloseHelp => view::close_help(app),
    }

    app.refresh();
    Ok(())
}
