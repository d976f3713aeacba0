//! Text formatting for card fields and width-limited rows.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Characters of card effect text shown before truncation.
pub const EFFECT_PREVIEW_CHARS: usize = 300;

const ELLIPSIS: &str = "...";

/// `$x.yy`, two decimals.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Whole numbers without a fraction, others as given.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// First `max_chars` characters of `text`, with `...` appended if cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => format!("{}{ELLIPSIS}", &text[..offset]),
        None => text.to_string(),
    }
}

/// Fit `text` into `width` terminal columns, ending in `…` if cut.
///
/// Wide characters (CJK, emoji) count as two columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Empty or whitespace-only optional text is treated as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
