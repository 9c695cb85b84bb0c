//! Shared rendering utilities: query match ranges and highlighted text.
//!
//! Ranges are `(start, end)` pairs of character indices (exclusive end), so
//! they are safe to apply to any UTF-8 text.

use crate::ui::theme::{Palette, ThemeMode};

/// Finds non-overlapping, case-insensitive occurrences of `query` in `text`.
///
/// Returns no ranges when lower-casing changes the character count of either
/// string, since indices would no longer line up with the original text.
///
/// # Example
///
/// ```rust
/// use artfeed::ui::helpers::match_ranges;
///
/// assert_eq!(match_ranges("Cat and CATS", "cat"), vec![(0, 3), (8, 11)]);
/// assert!(match_ranges("anything", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let text_chars: Vec<char> = text.chars().collect();
    let lower_text: Vec<char> = text.to_lowercase().chars().collect();
    let lower_query: Vec<char> = query.to_lowercase().chars().collect();

    if lower_text.len() != text_chars.len() || lower_query.len() != query.chars().count() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + lower_query.len() <= lower_text.len() {
        if lower_text[i..i + lower_query.len()] == lower_query[..] {
            ranges.push((i, i + lower_query.len()));
            i += lower_query.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Returns `text` with the given character ranges emphasised.
///
/// Highlighted sections use bold plus the palette heading color; the rest is
/// left unstyled.
#[must_use]
pub fn highlighted_text(text: &str, ranges: &[(usize, usize)], palette: &Palette) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 16);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > current_pos {
            out.extend(&chars[current_pos..start]);
        }

        out.push_str(ThemeMode::bold());
        out.push_str(&ThemeMode::fg(palette.heading));
        out.extend(&chars[start..end]);
        out.push_str(ThemeMode::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        out.extend(&chars[current_pos..]);
    }
    out
}

/// Shortens `text` to at most `max` characters, ending in "..." when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
