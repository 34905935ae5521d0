use ratatui::style::{Color, Style};

// Type aliases for clarity
pub type CharBuffer = Vec<Vec<char>>;
pub type StyleBuffer = Vec<Vec<Style>>;
pub type LinkBuffer = Vec<Vec<u8>>;

/// Placeholder for the second cell of a double-width character.
pub const WIDE_CONTINUATION: char = '\0';

pub const EMPTY_STATE: &str = "No mind map data available";
pub const APP_TITLE: &str = " mindweave ";

pub const EXPANDED_MARKER: &str = "[-] ";
pub const COLLAPSED_MARKER: &str = "[+] ";
pub const TRUNCATION: char = '…';

/// Node colour per level, cycling after the last entry.
pub const LEVEL_COLORS: [Color; 6] = [
    Color::Rgb(0x4A, 0x90, 0xE2),
    Color::Rgb(0x50, 0xE3, 0xC2),
    Color::Rgb(0xF5, 0xA6, 0x23),
    Color::Rgb(0xD0, 0x02, 0x1B),
    Color::Rgb(0x90, 0x13, 0xFE),
    Color::Rgb(0x00, 0xBC, 0xD4),
];

pub fn level_color(level: u32) -> Color {
    let index = level.saturating_sub(1) as usize % LEVEL_COLORS.len();
    LEVEL_COLORS[index]
}

// Directions a connector leaves a cell in
pub mod link {
    pub const UP: u8 = 1;
    pub const DOWN: u8 = 2;
    pub const LEFT: u8 = 4;
    pub const RIGHT: u8 = 8;
}

// Junction characters
pub mod junction {
    use super::link::{DOWN, LEFT, RIGHT, UP};

    pub const HORIZONTAL: char = '─';
    pub const VERTICAL: char = '│';
    pub const TOP_CORNER: char = '╭';
    pub const BOTTOM_CORNER: char = '╰';
    pub const TOP_RIGHT: char = '╮';
    pub const BOTTOM_RIGHT: char = '╯';
    pub const MIDDLE_LEFT: char = '├';
    pub const MIDDLE_RIGHT: char = '┤';
    pub const TOP_TEE: char = '┬';
    pub const BOTTOM_TEE: char = '┴';
    pub const CROSS: char = '┼';

    /// Box-drawing character joining the given link directions.
    pub fn glyph(links: u8) -> Option<char> {
        let ch = match links {
            0 => return None,
            l if l == UP | DOWN | LEFT | RIGHT => CROSS,
            l if l == UP | DOWN | RIGHT => MIDDLE_LEFT,
            l if l == UP | DOWN | LEFT => MIDDLE_RIGHT,
            l if l == LEFT | RIGHT | DOWN => TOP_TEE,
            l if l == LEFT | RIGHT | UP => BOTTOM_TEE,
            l if l == DOWN | RIGHT => TOP_CORNER,
            l if l == UP | RIGHT => BOTTOM_CORNER,
            l if l == DOWN | LEFT => TOP_RIGHT,
            l if l == UP | LEFT => BOTTOM_RIGHT,
            l if l & (UP | DOWN) != 0 && l & (LEFT | RIGHT) == 0 => VERTICAL,
            _ => HORIZONTAL,
        };
        Some(ch)
    }
}
