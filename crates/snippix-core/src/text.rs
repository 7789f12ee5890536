use unicode_width::UnicodeWidthChar;

use crate::MAX_TAB_WIDTH;

/// Display width of `ch` in monospace cells. Control characters take none.
pub(crate) fn char_cells(ch: char) -> usize {
    if ch.is_control() {
        return 0;
    }
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Cells a tab advances from column `col`: up to the next multiple of
/// `tab_width`, which is clamped to `1..=MAX_TAB_WIDTH`.
pub(crate) fn tab_advance(col: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.clamp(1, MAX_TAB_WIDTH);
    tab_width - col % tab_width
}

pub(crate) fn advance_column(col: usize, ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        col.saturating_add(tab_advance(col, tab_width))
    } else {
        col.saturating_add(char_cells(ch))
    }
}

pub(crate) fn text_width_cells(text: &str, tab_width: usize) -> usize {
    text.chars()
        .fold(0, |col, ch| advance_column(col, ch, tab_width))
}

pub(crate) fn truncate_to_cells(text: &str, max_cells: usize, ellipsis: &str) -> String {
    if max_cells == 0 {
        return String::new();
    }
    let width: usize = text.chars().map(char_cells).sum();
    if width <= max_cells {
        return text.to_string();
    }
    let ellipsis_width: usize = ellipsis.chars().map(char_cells).sum();
    if ellipsis_width >= max_cells {
        return ellipsis.chars().take(1).collect();
    }
    let mut out = String::new();
    let mut current = 0usize;
    for ch in text.chars() {
        let w = char_cells(ch);
        if current + w > max_cells - ellipsis_width {
            break;
        }
        out.push(ch);
        current += w;
    }
    out.push_str(ellipsis);
    out
}

/// Collapses line breaks and tabs so the text fits on one line.
pub(crate) fn single_line(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect::<String>()
        .trim()
        .to_string()
}
