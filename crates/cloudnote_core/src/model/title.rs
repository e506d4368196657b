//! Title derivation for note list rows.
//!
//! # Invariants
//! - Length is counted in Unicode scalar values, never bytes.
//! - A line of exactly `max_len` characters is returned unchanged.

/// Title used when a note has no visible text.
pub const UNTITLED: &str = "Untitled";
/// Marker appended to truncated titles.
pub const ELLIPSIS: char = '\u{2026}';
/// Title width used by list projections.
pub const DEFAULT_TITLE_LEN: usize = 30;

/// Derives a display title from note content.
///
/// Rules:
/// - Surrounding whitespace of the whole content is ignored.
/// - The first remaining line is used, without trailing whitespace. Bare
///   `\r`, form feeds and Unicode line/paragraph separators end a line.
/// - Empty or whitespace-only content yields [`UNTITLED`].
/// - Lines longer than `max_len` keep `max_len` characters plus [`ELLIPSIS`].
pub fn derive_title(content: &str, max_len: usize) -> String {
    let trimmed = content.trim_matches(|c: char| c.is_whitespace() || is_line_break(c));
    let first_line = trimmed.split(is_line_break).next().map(str::trim_end).unwrap_or("");
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }

    let mut chars = first_line.char_indices();
    match chars.nth(max_len) {
        Some((cut, _)) => {
            let mut title = String::with_capacity(cut + ELLIPSIS.len_utf8());
            title.push_str(&first_line[..cut]);
            title.push(ELLIPSIS);
            title
        }
        None => first_line.to_string(),
    }
}

/// Line boundaries recognized when picking the first line.
///
/// Covers bare `\r` and the separator controls, not just `\n`.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::{derive_title, DEFAULT_TITLE_LEN, UNTITLED};

    #[test]
    fn empty_and_blank_content_is_untitled() {
        assert_eq!(derive_title("", DEFAULT_TITLE_LEN), UNTITLED);
        assert_eq!(derive_title(" \n\t \n", DEFAULT_TITLE_LEN), UNTITLED);
    }

    #[test]
    fn exact_boundary_is_not_truncated() {
        let exact = "abcdefghijklmnopqrstuvwxyz0123";
        assert_eq!(exact.chars().count(), 30);
        assert_eq!(derive_title(exact, 30), exact);
        assert_eq!(
            derive_title("exactly-thirty-chars-long-AAA", 30),
            "exactly-thirty-chars-long-AAA"
        );
    }

    #[test]
    fn long_line_keeps_prefix_and_appends_ellipsis() {
        let title = derive_title("this line is definitely longer than thirty chars", 30);
        assert_eq!(title, "this line is definitely longer\u{2026}");
        assert_eq!(title.chars().count(), 31);
    }

    #[test]
    fn uses_first_non_blank_line() {
        assert_eq!(derive_title("\n\n  Buy milk  \nand eggs", 30), "Buy milk");
        assert_eq!(derive_title("Buy milk\r\nand eggs", 30), "Buy milk");
    }

    #[test]
    fn bare_carriage_return_and_unicode_separators_end_the_line() {
        assert_eq!(derive_title("Title\rmore", 30), "Title");
        assert_eq!(derive_title("Page one\x0cPage two", 30), "Page one");
        assert_eq!(derive_title("Head\u{2028}tail", 30), "Head");
        assert_eq!(derive_title("Para\u{2029}next", 30), "Para");
        assert_eq!(derive_title("Next\u{85}line", 30), "Next");
        assert_eq!(derive_title("\x1cGroup\x1drecord", 30), "Group");
        assert_eq!(derive_title("\r\r\x0b", 30), "Untitled");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = derive_title("ééééé", 3);
        assert_eq!(title, "ééé\u{2026}");
    }

    #[test]
    fn zero_width_truncates_everything() {
        assert_eq!(derive_title("abc", 0), "\u{2026}");
    }
}
