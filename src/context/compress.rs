//! Length bounding for rolling summaries.
//!
//! Summaries keep the most recent text: when a merged summary is over the
//! bound, the oldest (leftmost) characters are dropped.

/// Default summary bound, in characters.
pub const DEFAULT_MAX_CHARS: usize = 4000;

/// Return the last `max_chars` characters of `text`.
///
/// Characters are Unicode scalar values, so the cut never lands inside a
/// UTF-8 sequence.
pub fn tail_truncate(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return "";
    }

    // Walk from the end; the byte offset of the max_chars-th char from the
    // right is where the kept suffix starts.
    match text.char_indices().rev().nth(max_chars - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

/// Append `addition` to `previous` on a new line, trim, and bound the result.
pub fn merge_and_bound(previous: Option<&str>, addition: &str, max_chars: usize) -> String {
    let previous = previous.unwrap_or_default();
    let mut merged = String::with_capacity(previous.len() + addition.len() + 1);
    merged.push_str(previous);
    merged.push('\n');
    merged.push_str(addition);

    tail_truncate(merged.trim(), max_chars).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tail_truncate_keeps_short_text_whole() {
        assert_eq!(tail_truncate("hello", 10), "hello");
        assert_eq!(tail_truncate("hello", 5), "hello");
        assert_eq!(tail_truncate("", 5), "");
    }

    #[test]
    fn tail_truncate_keeps_most_recent_characters() {
        assert_eq!(tail_truncate("abcdef", 3), "def");
        assert_eq!(tail_truncate("abcdef", 0), "");
    }

    #[test]
    fn tail_truncate_respects_multibyte_boundaries() {
        let text = "año: ñandú";
        assert_eq!(tail_truncate(text, 5), "ñandú");
        assert_eq!(tail_truncate("ééééé", 2), "éé");
    }

    #[test]
    fn merge_joins_with_newline() {
        assert_eq!(merge_and_bound(Some("hello"), "world", 4000), "hello\nworld");
    }

    #[test]
    fn merge_without_previous_drops_leading_newline() {
        assert_eq!(merge_and_bound(None, "first turn", 4000), "first turn");
    }

    #[test]
    fn merge_with_empty_addition_trims_previous() {
        assert_eq!(merge_and_bound(Some("  kept  "), "", 4000), "kept");
        assert_eq!(merge_and_bound(None, "", 4000), "");
    }

    #[test]
    fn merge_truncates_after_trimming() {
        let long = "a".repeat(5000);
        let merged = merge_and_bound(None, &long, DEFAULT_MAX_CHARS);
        assert_eq!(merged.len(), DEFAULT_MAX_CHARS);
        assert!(merged.chars().all(|c| c == 'a'));

        // Trailing whitespace is trimmed before the tail is taken.
        let merged = merge_and_bound(Some("xyz"), "abc   ", 4);
        assert_eq!(merged, "\nabc");
    }

    proptest! {
        #[test]
        fn appends_never_exceed_bound(
            parts in proptest::collection::vec(".{0,300}", 0..40),
            max_chars in 1usize..600,
        ) {
            let mut summary: Option<String> = None;
            for part in &parts {
                let next = merge_and_bound(summary.as_deref(), part, max_chars);
                prop_assert!(next.chars().count() <= max_chars);
                summary = Some(next);
            }
        }

        #[test]
        fn truncation_is_exact_suffix(text in ".{0,200}", max_chars in 1usize..100) {
            let kept = tail_truncate(&text, max_chars);
            prop_assert!(text.ends_with(kept));
            let total = text.chars().count();
            prop_assert_eq!(kept.chars().count(), total.min(max_chars));
        }
    }
}
