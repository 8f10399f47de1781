//! Text helpers shared by the menu builders

pub const ELLIPSIS: char = '…';

/// Cut `value` to at most `max_chars` characters, appending an ellipsis only
/// when something was removed. Counts Unicode scalar values, never bytes.
pub fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        None => value.to_string(),
        Some((byte_index, _)) => {
            let mut truncated = String::with_capacity(byte_index + ELLIPSIS.len_utf8());
            truncated.push_str(&value[..byte_index]);
            truncated.push(ELLIPSIS);
            truncated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_value_is_unchanged() {
        assert_eq!(truncate("Hello", 30), "Hello");
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        let value = "a".repeat(30);
        assert_eq!(truncate(&value, 30), value);
    }

    #[test]
    fn test_long_value_gets_ellipsis() {
        let truncated = truncate("Hello World This Is A Long Title", 30);
        assert_eq!(truncated, "Hello World This Is A Long Tit…");
        assert_eq!(truncated.chars().count(), 31);
    }

    #[test]
    fn test_multibyte_safe() {
        let value = "Ä string with ümlaut characters and émojis 😀";
        let truncated = truncate(value, 20);
        assert_eq!(truncated.chars().count(), 21);
        assert!(truncated.ends_with(ELLIPSIS));
        assert_eq!(truncated, "Ä string with ümlaut…");

        let emoji = "😀😀😀";
        assert_eq!(truncate(emoji, 2), "😀😀…");
        assert_eq!(truncate(emoji, 3), emoji);
    }
}
