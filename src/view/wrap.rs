//! Word wrapping by display width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Wrap `text` into lines of at most `width` columns.
///
/// Breaks at word boundaries; a word wider than `width` is split by
/// grapheme. Whitespace at a break is dropped. Explicit newlines start a
/// new line. A zero width yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;

        for word in paragraph.split_word_bounds() {
            let word_width = word.width();
            let blank = word.trim().is_empty();

            if used + word_width <= width {
                if !(blank && used == 0) {
                    line.push_str(word);
                    used += word_width;
                }
                continue;
            }

            if blank {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                used = 0;
                continue;
            }

            if used > 0 {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                used = 0;
            }

            if word_width <= width {
                line.push_str(word);
                used = word_width;
                continue;
            }

            for grapheme in word.graphemes(true) {
                let w = grapheme.width();
                if used + w > width && used > 0 {
                    lines.push(std::mem::take(&mut line));
                    used = 0;
                }
                line.push_str(grapheme);
                used += w;
            }
        }

        lines.push(line.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("Try it with me now", 8), vec!["Try it", "with me", "now"]);
    }

    #[test]
    fn test_wrap_fits() {
        assert_eq!(wrap("hello", 10), vec!["hello"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_wrap_long_word_is_split() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_respects_display_width() {
        let lines = wrap("hi ✨ there", 5);
        assert_eq!(lines, vec!["hi ✨", "there"]);
        for line in &lines {
            assert!(line.width() <= 5);
        }
    }

    #[test]
    fn test_wrap_newlines() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert!(wrap("anything", 0).is_empty());
    }
}
