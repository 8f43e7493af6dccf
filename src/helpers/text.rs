//! Text helpers used by the list and detail views

/// Cut `text` down to at most `max_chars` characters, appending `...` when
/// anything was dropped
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Case-insensitive substring test; `needle` must already be lowercase
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
