use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` terminal columns, ending in `...`.
/// Hangul syllables take two columns each.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Terminal columns taken by the first `cursor_chars` characters of `text`.
pub fn cursor_column(text: &str, cursor_chars: usize) -> usize {
    text.chars()
        .take(cursor_chars)
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// `75` -> `"1m 15s"`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn format_percentage(value: Option<u32>) -> String {
    match value {
        Some(p) => format!("{}%", p),
        None => "-".to_string(),
    }
}

/// Heading for a round in the history list. The last round is the current one.
pub fn round_label(index: usize, count: usize, is_review: bool) -> String {
    let base = if index + 1 == count {
        "Current round".to_string()
    } else {
        format!("Round {}", index + 1)
    };
    if is_review {
        format!("{} (review)", base)
    } else {
        base
    }
}
