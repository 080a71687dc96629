//! Utility functions shared across modules

/// Truncate a string to at most `max_bytes` bytes, ensuring the cut lands on a
/// valid UTF-8 char boundary. Returns the longest prefix that fits.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Split a message into chunks of at most `max_len` bytes, preferring to break
/// on a newline near the end of each chunk and never inside a UTF-8 char.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let end = start + truncate_str(&text[start..], max_len).len();
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .filter(|&pos| pos + 200 > end - start)
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_str_arabic_boundary() {
        // Each Arabic letter is 2 bytes in UTF-8
        let s = "مرحبا";
        assert_eq!(truncate_str(s, 3), "م");
        assert_eq!(truncate_str(s, 4), "مر");
        assert_eq!(truncate_str(s, 0), "");
    }

    #[test]
    fn test_split_short_message() {
        assert_eq!(split_message("hello", 4096), vec!["hello"]);
    }

    #[test]
    fn test_split_long_message() {
        let text = "a\n".repeat(3000);
        let chunks = split_message(&text, 4096);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.len() <= 4096);
        }
        let joined: String = chunks.into_iter().collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_split_no_newlines() {
        let text = "a".repeat(5000);
        let chunks = split_message(&text, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 4096);
        assert_eq!(chunks[1].len(), 904);
    }

    #[test]
    fn test_split_multibyte_never_panics() {
        let text = "ب".repeat(3000); // 6000 bytes
        let chunks = split_message(&text, 4095);
        assert!(chunks.iter().all(|c| c.len() <= 4095));
        let joined: String = chunks.into_iter().collect();
        assert_eq!(joined, text);
    }
}
