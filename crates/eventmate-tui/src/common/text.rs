//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` terminal columns.
///
/// Wide characters (CJK, emoji) count by their display width.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        used += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Counts the rows `text` takes when word-wrapped to `width` columns.
///
/// Words wider than `width` are split across rows.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    let width = width.max(1);
    let rows: usize = text
        .lines()
        .map(|line| {
            let mut rows = 1;
            let mut used = 0;
            for word in line.split_whitespace() {
                let word_width = word.width();
                let needed = if used == 0 {
                    word_width
                } else {
                    used + 1 + word_width
                };
                if needed <= width {
                    used = needed;
                } else if word_width <= width {
                    rows += 1;
                    used = word_width;
                } else {
                    if used > 0 {
                        rows += 1;
                    }
                    let spanned = word_width.div_ceil(width);
                    rows += spanned - 1;
                    used = word_width - (spanned - 1) * width;
                }
            }
            rows
        })
        .sum();
    rows.max(1)
}
