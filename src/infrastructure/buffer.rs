//! # Text Buffer
//!
//! An in-memory, line-addressed implementation of the editing surface.
//! Addressing is validated before any mutation: a line past the end, an
//! inverted range, or a character past the end of its line is an error, never
//! a silent clamp.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::EditSurface;
use crate::domain::types::{EditPosition, EditRange};

#[derive(Debug, Default)]
pub struct TextBuffer {
    lines: Vec<String>,
    selection: Option<(u32, u32)>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
            selection: None,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The last selected line span, if any.
    pub fn selection(&self) -> Option<(u32, u32)> {
        self.selection
    }

    /// Resolve a position to its line index and byte offset within the line.
    /// Characters count Unicode scalar values, matching how the model is told
    /// to address the file.
    fn resolve(&self, position: &EditPosition) -> Result<(usize, usize)> {
        let line_idx = position.line as usize;
        let Some(line) = self.lines.get(line_idx) else {
            bail!(
                "line {} is past the end of the buffer ({} lines)",
                position.line,
                self.lines.len()
            );
        };
        let mut chars = 0u32;
        for (byte_offset, _) in line.char_indices() {
            if chars == position.character {
                return Ok((line_idx, byte_offset));
            }
            chars += 1;
        }
        if chars == position.character {
            return Ok((line_idx, line.len()));
        }
        bail!(
            "character {} is past the end of line {} ({} characters)",
            position.character,
            position.line,
            chars
        );
    }
}

#[async_trait]
impl EditSurface for TextBuffer {
    async fn insert_line(&mut self, line: u32, text: &str) -> Result<()> {
        let idx = line as usize;
        if idx > self.lines.len() {
            bail!(
                "insert target line {} is past the end of the buffer ({} lines)",
                line,
                self.lines.len()
            );
        }
        // A trailing newline means "insert as whole lines above the target".
        let body = text.strip_suffix('\n').unwrap_or(text);
        for (offset, new_line) in body.split('\n').enumerate() {
            self.lines.insert(idx + offset, new_line.to_string());
        }
        Ok(())
    }

    async fn replace_range(&mut self, range: &EditRange, text: &str) -> Result<()> {
        if range.end.line < range.start.line
            || (range.end.line == range.start.line && range.end.character < range.start.character)
        {
            bail!(
                "range end {}:{} is before its start {}:{}",
                range.end.line,
                range.end.character,
                range.start.line,
                range.start.character
            );
        }
        let (start_line, start_byte) = self.resolve(&range.start)?;
        let (end_line, end_byte) = self.resolve(&range.end)?;

        let prefix = self.lines[start_line][..start_byte].to_string();
        let suffix = self.lines[end_line][end_byte..].to_string();
        let replaced = format!("{}{}{}", prefix, text, suffix);

        let new_lines: Vec<String> = replaced.split('\n').map(String::from).collect();
        self.lines.splice(start_line..=end_line, new_lines);
        Ok(())
    }

    async fn select_lines(&mut self, start: u32, end: u32) -> Result<()> {
        if end < start {
            bail!("selection end {} is before its start {}", end, start);
        }
        if end as usize >= self.lines.len() {
            bail!(
                "selection end {} is past the end of the buffer ({} lines)",
                end,
                self.lines.len()
            );
        }
        self.selection = Some((start, end));
        tracing::debug!("Selection set to lines {}..={}", start, end);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_pushes_target_line_down() {
        let mut buffer = TextBuffer::from_text("fn main() {\n}");
        buffer.insert_line(1, "    println!(\"hi\");\n").await.unwrap();
        assert_eq!(buffer.text(), "fn main() {\n    println!(\"hi\");\n}");
    }

    #[tokio::test]
    async fn insert_at_end_appends() {
        let mut buffer = TextBuffer::from_text("a");
        buffer.insert_line(1, "b\n").await.unwrap();
        assert_eq!(buffer.text(), "a\nb");
    }

    #[tokio::test]
    async fn insert_past_end_fails_loudly() {
        let mut buffer = TextBuffer::from_text("only line");
        let err = buffer.insert_line(5, "x\n").await.unwrap_err();
        assert!(err.to_string().contains("past the end"));
        assert_eq!(buffer.text(), "only line");
    }

    #[tokio::test]
    async fn replace_within_one_line() {
        let mut buffer = TextBuffer::from_text("let x = 10;");
        buffer
            .replace_range(&EditRange::new(0, 8, 0, 10), "42")
            .await
            .unwrap();
        assert_eq!(buffer.text(), "let x = 42;");
    }

    #[tokio::test]
    async fn replace_across_lines() {
        let mut buffer = TextBuffer::from_text("one\ntwo\nthree");
        buffer
            .replace_range(&EditRange::new(0, 3, 2, 0), " ")
            .await
            .unwrap();
        assert_eq!(buffer.text(), "one three");
    }

    #[tokio::test]
    async fn replace_with_multiline_text() {
        let mut buffer = TextBuffer::from_text("ab");
        buffer
            .replace_range(&EditRange::new(0, 1, 0, 1), "\nmid\n")
            .await
            .unwrap();
        assert_eq!(buffer.text(), "a\nmid\nb");
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let mut buffer = TextBuffer::from_text("abc\ndef");
        let err = buffer
            .replace_range(&EditRange::new(1, 0, 0, 2), "x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("before its start"));
        assert_eq!(buffer.text(), "abc\ndef");
    }

    #[tokio::test]
    async fn character_past_line_end_is_rejected() {
        let mut buffer = TextBuffer::from_text("ab");
        let err = buffer
            .replace_range(&EditRange::new(0, 0, 0, 7), "x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("past the end of line"));
    }

    #[tokio::test]
    async fn selection_is_tracked() {
        let mut buffer = TextBuffer::from_text("a\nb\nc\nd");
        buffer.select_lines(1, 2).await.unwrap();
        assert_eq!(buffer.selection(), Some((1, 2)));
    }

    #[tokio::test]
    async fn selection_past_end_is_rejected() {
        let mut buffer = TextBuffer::from_text("a\nb");
        assert!(buffer.select_lines(0, 9).await.is_err());
        assert_eq!(buffer.selection(), None);
    }

    #[tokio::test]
    async fn multibyte_characters_are_addressed_by_scalar() {
        let mut buffer = TextBuffer::from_text("héllo");
        buffer
            .replace_range(&EditRange::new(0, 1, 0, 2), "e")
            .await
            .unwrap();
        assert_eq!(buffer.text(), "hello");
    }
}
