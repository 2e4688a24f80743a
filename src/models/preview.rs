use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Build a single-line preview of an entry that fits in `max_width` columns
///
/// Only the first line is shown. Truncated previews end with "..." and the
/// ellipsis counts toward the width.
pub fn preview(text: &str, max_width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let multiline = text.lines().nth(1).is_some();

    if first_line.width() <= max_width && !multiline {
        return first_line.to_string();
    }

    const ELLIPSIS: &str = "...";
    let budget = max_width.saturating_sub(ELLIPSIS.len());

    let mut out = String::new();
    let mut used = 0;
    for c in first_line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }

    if max_width >= ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    out
}
