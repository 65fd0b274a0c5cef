use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to a display width, appending an ellipsis when anything was
/// cut. Width-aware so CJK names do not overflow their column.
pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}
