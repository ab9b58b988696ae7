//! Terminal UI components: header, site pages, and the chat panel.

pub mod chat;
pub mod header;
pub mod pages;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap text to a display width, honoring wide (CJK) characters.
/// Whitespace-separated words wrap whole when they fit; oversized runs
/// (Chinese copy has no spaces) hard-break at character boundaries.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw_line.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            let separator = usize::from(current_width > 0);

            if current_width + separator + word_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            } else if separator == 1 {
                current.push(' ');
                current_width += 1;
            }

            if word_width <= width {
                current.push_str(word);
                current_width += word_width;
            } else {
                for ch in word.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if current_width + ch_width > width && current_width > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += ch_width;
                }
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn english_wraps_at_word_boundaries() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn chinese_copy_breaks_by_display_width() {
        let lines = wrap_text("我们提供一站式解决方案", 8);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 8, "line too wide: {line}");
        }
        assert_eq!(lines.concat(), "我们提供一站式解决方案");
    }

    #[test]
    fn explicit_newlines_are_preserved() {
        let lines = wrap_text("a\n\nb", 10);
        assert_eq!(lines, vec!["a", "", "b"]);
    }
}
