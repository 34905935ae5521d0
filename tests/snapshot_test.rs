mod common;

use common::{app_with, load_fixture};
use insta::assert_snapshot;
use mindweave::{app::AppMode, export, ui, AppState, LayoutSettings, NodeId, NodeStore, Session};
use ratatui::{backend::TestBackend, Terminal};

fn render_rows(app: &mut AppState, width: u16, height: u16) -> Vec<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

#[test]
fn test_outline_of_analysis_response() {
    let session = Session::with_store(
        load_fixture("analysis_response.json"),
        LayoutSettings::default(),
    );

    assert_snapshot!(export::outline(&session.frame()), @r"
    [-] Quarterly report
      [-] Revenue
        Subscriptions grew
        Services flat
      [-] Hiring
        Two new engineers
    ");
}

#[test]
fn test_outline_with_collapsed_branch() {
    let mut session = Session::with_store(
        load_fixture("analysis_response.json"),
        LayoutSettings::default(),
    );
    session.toggle(&NodeId::from("node1"));

    assert_snapshot!(export::outline(&session.frame()), @r"
    [-] Quarterly report
      [+] Revenue
      [-] Hiring
        Two new engineers
    ");
}

#[test]
fn test_render_empty_mindmap() {
    let mut app = app_with(NodeStore::default());
    let rows = render_rows(&mut app, 60, 12);

    assert!(rows.iter().any(|r| r.contains("No mind map data available")));
    assert!(rows[11].contains("0 of 0 nodes"));
}

#[test]
fn test_render_simple_tree_with_frame() {
    let mut app = app_with(load_fixture("simple_tree.json"));
    let rows = render_rows(&mut app, 80, 20);

    assert!(rows[0].contains("mindweave"), "title on the border: {:?}", rows[0]);
    assert!(rows.iter().any(|r| r.contains("[-] Root")));
    assert!(rows.iter().any(|r| r.contains("A1")));
    assert!(rows[19].starts_with("mindweave | 4 of 4 nodes | 0 collapsed | ? help"));
}

#[test]
fn test_render_fullscreen_drops_chrome() {
    let mut app = app_with(load_fixture("simple_tree.json"));
    app.session.set_fullscreen(true);
    app.refresh();
    let rows = render_rows(&mut app, 80, 20);

    assert!(rows.iter().all(|r| !r.contains("? help")));
    assert!(rows.iter().all(|r| !r.contains('┌')));
}

#[test]
fn test_render_help_screen() {
    let mut app = app_with(load_fixture("simple_tree.json"));
    app.mode = AppMode::Help;
    let rows = render_rows(&mut app, 80, 30);

    assert!(rows.iter().any(|r| r.contains("Navigation")));
    assert!(rows[29].contains("Press ESC or q to close help"));
}

#[test]
fn test_render_warning_count() {
    let mut app = app_with(load_fixture("dangling_parent.json"));
    let rows = render_rows(&mut app, 80, 20);

    assert!(rows[19].contains("1 warnings"), "status line: {:?}", rows[19]);
}
