use crate::ui::constants::{junction, CharBuffer, LinkBuffer, StyleBuffer, WIDE_CONTINUATION};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

// Buffer canvas for drawing characters and styles
pub struct BufferCanvas {
    pub char_buffer: CharBuffer,
    pub style_buffer: StyleBuffer,
    pub link_buffer: LinkBuffer,
    pub width: usize,
    pub height: usize,
}

impl BufferCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            char_buffer: vec![vec![' '; width]; height],
            style_buffer: vec![vec![Style::default(); width]; height],
            link_buffer: vec![vec![0; width]; height],
            width,
            height,
        }
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (y as u64) < self.height as u64 && (x as u64) < self.width as u64
    }

    pub fn set_char(&mut self, x: i64, y: i64, ch: char, style: Style) {
        if self.in_bounds(x, y) {
            self.char_buffer[y as usize][x as usize] = ch;
            self.style_buffer[y as usize][x as usize] = style;
        }
    }

    /// Draws text starting at a possibly off-screen cell; parts outside the
    /// canvas are clipped. Double-width characters take two cells.
    pub fn draw_styled_text(&mut self, x: i64, y: i64, text: &str, style: Style) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width as i64 {
                break;
            }
            let w = ch.width().unwrap_or(0) as i64;
            if w == 0 {
                continue;
            }
            if w == 2 && !(self.in_bounds(cx, y) && self.in_bounds(cx + 1, y)) {
                // A half-visible wide character would shift the row.
                self.set_char(cx, y, ' ', style);
                self.set_char(cx + 1, y, ' ', style);
            } else {
                self.set_char(cx, y, ch, style);
                if w == 2 {
                    self.set_char(cx + 1, y, WIDE_CONTINUATION, style);
                }
            }
            cx += w;
        }
    }

    /// Records that a connector leaves cell `(x, y)` in the `dirs` directions.
    pub fn link(&mut self, x: i64, y: i64, dirs: u8) {
        if self.in_bounds(x, y) {
            self.link_buffer[y as usize][x as usize] |= dirs;
        }
    }

    /// Turns recorded links into box-drawing characters on empty cells.
    pub fn resolve_links(&mut self, style: Style) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.char_buffer[y][x] != ' ' {
                    continue;
                }
                if let Some(ch) = junction::glyph(self.link_buffer[y][x]) {
                    self.char_buffer[y][x] = ch;
                    self.style_buffer[y][x] = style;
                }
            }
        }
    }

    pub fn row_text(&self, y: usize) -> String {
        self.char_buffer
            .get(y)
            .map(|row| row.iter().filter(|&&ch| ch != WIDE_CONTINUATION).collect())
            .unwrap_or_default()
    }

    pub fn to_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        for (y, row) in self.char_buffer.iter().enumerate() {
            let mut spans = Vec::new();
            let mut current_style = Style::default();
            let mut current_text = String::new();

            for (x, &ch) in row.iter().enumerate() {
                if ch == WIDE_CONTINUATION {
                    continue;
                }
                let style = self.style_buffer[y][x];
                if style != current_style {
                    if !current_text.is_empty() {
                        spans.push(Span::styled(current_text.clone(), current_style));
                        current_text.clear();
                    }
                    current_style = style;
                }
                current_text.push(ch);
            }

            if !current_text.is_empty() {
                spans.push(Span::styled(current_text, current_style));
            }

            lines.push(Line::from(spans));
        }

        lines
    }
}
