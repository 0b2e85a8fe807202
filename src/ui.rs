//! Shared UI building blocks.

pub mod grid;
pub mod help;
pub mod layout;
pub mod screen;
pub mod spinner;
pub mod status_bar;
pub mod table;
pub mod toast;

/// Truncate a string to at most `max_chars` characters, appending an
/// ellipsis when it was cut.
///
/// Operates on char boundaries, never byte offsets. Product and theme
/// names are Korean and slicing bytes would panic mid-character.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_str("gift", 10), "gift");
        assert_eq!(truncate_str("gift", 4), "gift");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_str("생일선물테마", 4), "생일선…");
        assert_eq!(truncate_str("abcdef", 4), "abc…");
    }
}
