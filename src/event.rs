use crate::actions::Action;
use crate::app::{AppMode, AppState};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub fn handle_events(app: &mut AppState) -> Result<Option<Action>> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key_event(app, key));
            }
        }
    }
    Ok(None)
}

pub fn handle_key_event(app: &AppState, key: KeyEvent) -> Option<Action> {
    match &app.mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Help => handle_help_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Option<Action> {
    use KeyCode::*;

    match (key.code, key.modifiers) {
        // Quit
        (Char('q'), KeyModifiers::NONE) => Some(Action::Quit),
        (Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),

        // Movement
        (Char('h'), KeyModifiers::NONE) | (Left, _) => Some(Action::GoLeft),
        (Char('j'), KeyModifiers::NONE) | (Down, _) => Some(Action::GoDown),
        (Char('k'), KeyModifiers::NONE) | (Up, _) => Some(Action::GoUp),
        (Char('l'), KeyModifiers::NONE) | (Right, _) => Some(Action::GoRight),

        // Collapsing
        (Char(' '), KeyModifiers::NONE) | (Enter, KeyModifiers::NONE) => {
            Some(Action::ToggleCollapse)
        }
        (Char('v'), KeyModifiers::NONE) => Some(Action::CollapseAll),
        (Char('b'), KeyModifiers::NONE) => Some(Action::ExpandAll),
        (Char(c @ '1'..='5'), KeyModifiers::NONE) => {
            c.to_digit(10).map(Action::CollapseToLevel)
        }

        // View control
        (Char('F'), KeyModifiers::SHIFT) | (Char('F'), KeyModifiers::NONE) => {
            Some(Action::ToggleFullscreen)
        }
        (Char('c'), KeyModifiers::NONE) => Some(Action::FitToView),

        // Clipboard
        (Char('y'), KeyModifiers::NONE) => Some(Action::YankNode),

        // Help
        (Char('?'), _) => Some(Action::ShowHelp),

        _ => None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseHelp),
        _ => None,
    }
}
