//! Sliding-window text chunker

use crate::domain::ingestion::ChunkingConfig;

/// Split `text` into overlapping windows of `chunk_size` characters.
///
/// Every returned chunk is trimmed and non-empty. The window start
/// advances to `end - chunk_overlap` when that moves it forward,
/// otherwise straight to `end`, so progress is guaranteed even with an
/// overlap at or above the chunk size. Positions are characters, not
/// bytes, so multi-byte text never splits inside a code point.
pub fn chunk(text: &str, config: &ChunkingConfig) -> Vec<String> {
    if config.chunk_size == 0 {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![trimmed.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < n {
        let end = usize::min(start + config.chunk_size, n);
        let window: String = chars[start..end].iter().collect();
        let trimmed = window.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }

        start = if end > config.chunk_overlap && end - config.chunk_overlap > start {
            end - config.chunk_overlap
        } else {
            end
        };
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap)
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk("hello world", &config(800, 100));
        assert_eq!(chunks, vec!["hello world"]);
    }

    #[test]
    fn test_windows_overlap() {
        let text = "abcdefghij";
        let chunks = chunk(text, &config(4, 2));

        // The final window re-covers the overlap tail.
        assert_eq!(chunks, vec!["abcd", "cdef", "efgh", "ghij", "ij"]);
    }

    #[test]
    fn test_zero_size_returns_whole_text() {
        let chunks = chunk("  some document  ", &config(0, 100));
        assert_eq!(chunks, vec!["some document"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk("", &config(800, 100)).is_empty());
        assert!(chunk("   \n\t  ", &config(800, 100)).is_empty());
        assert!(chunk("", &config(0, 0)).is_empty());
        assert!(chunk("  \n ", &config(0, 0)).is_empty());
    }

    #[test]
    fn test_overlap_at_or_above_size_still_advances() {
        // With overlap >= size the start would never move; it must jump
        // to the window end instead.
        let text = "abcdefghij";
        let chunks = chunk(text, &config(3, 3));
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);

        let chunks = chunk(text, &config(3, 10));
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);
    }

    #[test]
    fn test_chunks_are_trimmed_and_non_empty() {
        let text = "first   \n\n\n\n\n\n\n\nsecond";
        let chunks = chunk(text, &config(8, 0));

        assert!(!chunks.is_empty());
        for c in &chunks {
            assert!(!c.is_empty());
            assert_eq!(c, c.trim());
        }
    }

    #[test]
    fn test_whitespace_only_window_is_dropped() {
        // Middle window is pure whitespace and must not appear.
        let text = "aaaa        bbbb";
        let chunks = chunk(text, &config(4, 0));
        assert_eq!(chunks, vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "éééééééééé";
        let chunks = chunk(text, &config(4, 1));

        assert_eq!(chunks[0], "éééé");
        for c in &chunks {
            assert!(c.chars().count() <= 4);
        }
    }

    #[test]
    fn test_forward_progress_over_long_input() {
        let text = "x".repeat(10_000);
        let chunks = chunk(&text, &config(800, 100));

        // Starts advance by 700 up to 9100, then 9800 and the 9900 tail.
        assert_eq!(chunks.len(), 16);
        assert_eq!(chunks[0].len(), 800);
        assert_eq!(chunks.last().unwrap().len(), 100);
    }
}
