use crate::ui::constants::level_color;
use crate::ui::text::display_width;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Key bindings grouped as shown on the help screen.
pub const KEY_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("h ←", "parent"),
            ("j ↓", "next node below"),
            ("k ↑", "next node above"),
            ("l →", "child, opening a collapsed node"),
        ],
    ),
    (
        "Collapse",
        &[
            ("space ⏎", "toggle active node"),
            ("v", "collapse all below the roots"),
            ("b", "expand all"),
            ("1-5", "collapse from that level down"),
        ],
    ),
    (
        "View",
        &[
            ("F", "fullscreen"),
            ("c", "fit map to view"),
            ("y", "copy node text"),
            ("q", "quit"),
        ],
    ),
];

/// Draws the key bindings in a box centred over `area`.
pub struct HelpRenderer;

impl HelpRenderer {
    pub fn render(frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;

        // Content plus border and one column of padding per side.
        let width = (content_width + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::DarkGray));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn lines() -> Vec<Line<'static>> {
        let key_width = KEY_GROUPS
            .iter()
            .flat_map(|(_, keys)| keys.iter())
            .map(|(key, _)| display_width(key))
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (i, (title, keys)) in KEY_GROUPS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            // Section headings reuse the map's level colours.
            let heading = Style::default()
                .fg(level_color(i as u32 + 1))
                .add_modifier(Modifier::BOLD);
            lines.push(Line::from(Span::styled(format!(" {}", title), heading)));

            for (key, desc) in keys.iter() {
                let pad = key_width - display_width(key);
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {}{}", key, " ".repeat(pad)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {}", desc)),
                ]));
            }
        }
        lines
    }
}
