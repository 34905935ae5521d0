use crate::ui::constants::TRUNCATION;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

// Label fitting utility
pub struct TextFitter;

impl TextFitter {
    /// Collapses whitespace runs and cuts the label to `max_width` display
    /// columns, marking the cut with an ellipsis.
    pub fn fit(text: &str, max_width: usize) -> String {
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if display_width(&flat) <= max_width {
            return flat;
        }
        if max_width == 0 {
            return String::new();
        }

        let budget = max_width - 1;
        let mut out = String::new();
        let mut width = 0;
        for ch in flat.chars() {
            let w = ch.width().unwrap_or(0);
            if width + w > budget {
                break;
            }
            out.push(ch);
            width += w;
        }
        out.push(TRUNCATION);
        out
    }
}
