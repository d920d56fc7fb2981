//! Shared utility functions.

use chrono::NaiveDateTime;
use unicode_segmentation::UnicodeSegmentation;

/// `strftime` pattern used in every artifact file name, e.g. `02-01-2025T03h04m05s`.
pub const RUN_TIMESTAMP_FORMAT: &str = "%d-%m-%YT%Hh%Mm%Ss";

/// Formats a run timestamp for use in artifact file names.
pub fn format_run_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// Number of user-perceived characters in `text`.
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Greedy word wrap at `width` graphemes.
///
/// Words longer than `width` are split across lines. Whitespace-only input
/// yields no lines.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = grapheme_count(word);

        if current_len > 0 && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= width {
            current.push_str(word);
            current_len = word_len;
        } else {
            let graphemes: Vec<&str> = word.graphemes(true).collect();
            for chunk in graphemes.chunks(width) {
                if chunk.len() == width {
                    lines.push(chunk.concat());
                } else {
                    current = chunk.concat();
                    current_len = chunk.len();
                }
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Truncates a string to a maximum number of graphemes with an ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if grapheme_count(input) <= max_length {
        input.to_string()
    } else {
        let kept: String = input
            .graphemes(true)
            .take(max_length.saturating_sub(3))
            .collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_run_timestamp() {
        let timestamp = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(format_run_timestamp(timestamp), "02-01-2025T03h04m05s");
    }

    #[test]
    fn test_wrap_label_breaks_on_words() {
        let lines = wrap_label("Sousou no Frieren (Adventure, Drama, Fantasy)", 20);
        assert_eq!(
            lines,
            vec!["Sousou no Frieren", "(Adventure, Drama,", "Fantasy)"]
        );
    }

    #[test]
    fn test_wrap_label_short_text_is_single_line() {
        assert_eq!(wrap_label("Action", 40), vec!["Action"]);
        assert!(wrap_label("   ", 40).is_empty());
    }

    #[test]
    fn test_wrap_label_splits_long_words() {
        let lines = wrap_label("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrap_label_counts_characters_not_bytes() {
        let lines = wrap_label("葬送のフリーレン", 4);
        assert_eq!(lines, vec!["葬送のフ", "リーレン"]);
    }

    #[test]
    fn test_wrap_label_keeps_combining_marks_together() {
        // "e" + U+0301 is one grapheme but two chars
        let word = "Pok\u{65}\u{301}mon";
        assert_eq!(grapheme_count(word), 7);
        assert_eq!(wrap_label(word, 7), vec![word]);

        let lines = wrap_label(word, 4);
        assert_eq!(lines, vec!["Poke\u{301}", "mon"]);
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
        assert_eq!(truncate_string("ÅÅÅÅÅÅ", 5), "ÅÅ...");
        assert_eq!(truncate_string("e\u{301}e\u{301}e\u{301}e\u{301}", 3), "...");
        assert_eq!(truncate_string("e\u{301}e\u{301}e\u{301}e\u{301}", 4), "e\u{301}...");
    }
}
