//! Line/offset mapping over the flattened document text.
//!
//! Built on a Rope for O(log n) line access. The engine uses this to annotate
//! located matches with line numbers (suggestions carry an optional line
//! hint) and to answer host queries about where in the document an offset
//! falls. Like every other index in this crate it is rebuilt from the current
//! text on demand, never cached across mutations.

use ropey::Rope;

/// Rope-backed line index over a plain-text document.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count. An empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Zero-based line containing `char_offset` (clamped to the last line).
    pub fn line_of_char(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.rope.len_chars());
        self.rope.char_to_line(clamped)
    }

    /// Character offset of the first character of `line` (clamped to the
    /// document end for out-of-range lines).
    pub fn char_of_line(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Text of `line` without its trailing newline, or `None` out of range.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let index = LineIndex::from_text("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.char_count(), 0);
        assert_eq!(index.line_of_char(0), 0);
    }

    #[test]
    fn test_line_of_char() {
        let index = LineIndex::from_text("First line\nSecond line\nThird line");
        assert_eq!(index.line_of_char(0), 0);
        assert_eq!(index.line_of_char(9), 0);
        assert_eq!(index.line_of_char(11), 1);
        assert_eq!(index.line_of_char(23), 2);
        // Past the end clamps to the last line.
        assert_eq!(index.line_of_char(1000), 2);
    }

    #[test]
    fn test_char_of_line() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");
        assert_eq!(index.char_of_line(0), 0);
        assert_eq!(index.char_of_line(1), 4);
        assert_eq!(index.char_of_line(2), 8);
        assert_eq!(index.char_of_line(99), 11);
    }

    #[test]
    fn test_line_text() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");
        assert_eq!(index.line_text(1).as_deref(), Some("DEF"));
        assert_eq!(index.line_text(2).as_deref(), Some("GHI"));
        assert_eq!(index.line_text(3), None);
    }

    #[test]
    fn test_cjk_offsets() {
        let index = LineIndex::from_text("你好\n世界");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.line_of_char(1), 0);
        assert_eq!(index.line_of_char(3), 1);
    }
}
