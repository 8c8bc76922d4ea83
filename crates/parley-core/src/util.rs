//! Text helpers for logs and listings.

/// Longest text kept by [`compact_text`].
pub const COMPACT_TEXT_MAX_CHARS: usize = 180;

/// Collapse runs of whitespace (newlines included) to single spaces and cap
/// the result, so response bodies and titles fit on one line.
pub fn compact_text(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= COMPACT_TEXT_MAX_CHARS {
        return collapsed;
    }
    let mut truncated = collapsed
        .chars()
        .take(COMPACT_TEXT_MAX_CHARS - 3)
        .collect::<String>();
    truncated.push_str("...");
    truncated
}
