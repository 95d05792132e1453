//! Text helpers shared by the selector, the prompt builder, and the relay.

/// Prefix-truncate `s` to at most `max_chars` Unicode scalar values.
///
/// This is deliberately not a smart truncation: the cap takes a fixed-length
/// prefix. The slice boundary always lands on a char boundary, so multi-byte
/// text (the prompts and documents here are largely Cyrillic) is never split
/// mid-code-point.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn long_input_prefix_truncated() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 7 Cyrillic chars, 14 bytes
        let s = "договор";
        assert_eq!(truncate_chars(s, 3), "дог");
        assert_eq!(truncate_chars(s, 7), s);
    }

    #[test]
    fn idempotent() {
        let s = "Стороны обязуются исполнить договор в срок.";
        let once = truncate_chars(s, 10);
        let twice = truncate_chars(once, 10);
        assert_eq!(once, twice);
        assert_eq!(once.chars().count(), 10);
    }

    #[test]
    fn zero_cap_yields_empty() {
        assert_eq!(truncate_chars("text", 0), "");
    }
}
