pub mod canvas;
pub mod constants;
pub mod help;
pub mod mindmap;
pub mod status_line;
pub mod text;


use crate::app::{AppMode, AppState};
use constants::APP_TITLE;
use help::HelpRenderer;
use mindmap::MindMapRenderer;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
    Frame,
};
use status_line::StatusLineRenderer;

// Main render function
pub fn render(frame: &mut Frame, app: &mut AppState) {
    // Update terminal size
    let size = frame.area();
    app.terminal_width = size.width;
    app.terminal_height = size.height;

    // Fullscreen: the map takes the whole terminal, no border or status line.
    if app.frame.fullscreen {
        match &app.mode {
            AppMode::Help => HelpRenderer::render(frame, size),
            AppMode::Normal => MindMapRenderer::new(app).render(frame, size),
        }
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    match &app.mode {
        AppMode::Help => HelpRenderer::render(frame, chunks[0]),
        AppMode::Normal => {
            let block = Block::default().borders(Borders::ALL).title(APP_TITLE);
            let inner = block.inner(chunks[0]);
            frame.render_widget(block, chunks[0]);
            MindMapRenderer::new(app).render(frame, inner);
        }
    }

    StatusLineRenderer::render(frame, app, chunks[1]);
}
