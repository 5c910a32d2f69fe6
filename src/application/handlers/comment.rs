//! Comment: insert text as a new line before the target line.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface};
use crate::domain::types::{Action, ActionRecord};

pub struct CommentHandler;

#[async_trait]
impl ActionHandler for CommentHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Comment { .. }))
    }

    async fn apply(&self, record: &ActionRecord, surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Comment { line, text }) = record.decode() else {
            bail!("record no longer decodes as a comment action");
        };
        // Trailing newline keeps the target line on its own row.
        surface.insert_line(line, &format!("{}\n", text)).await
    }

    fn name(&self) -> &'static str {
        "comment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EditRange;
    use serde_json::json;

    struct RecordingSurface {
        calls: Vec<(u32, String)>,
    }

    #[async_trait]
    impl EditSurface for RecordingSurface {
        async fn insert_line(&mut self, line: u32, text: &str) -> Result<()> {
            self.calls.push((line, text.to_string()));
            Ok(())
        }
        async fn replace_range(&mut self, _: &EditRange, _: &str) -> Result<()> {
            Ok(())
        }
        async fn select_lines(&mut self, _: u32, _: u32) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn inserts_before_target_line_with_newline() {
        let record = ActionRecord::new(json!({"kind": "comment", "line": 10, "text": "// checked"}));
        assert!(CommentHandler.accepts(&record));

        let mut surface = RecordingSurface { calls: Vec::new() };
        CommentHandler.apply(&record, &mut surface).await.unwrap();
        assert_eq!(surface.calls, vec![(10, "// checked\n".to_string())]);
    }

    #[test]
    fn rejects_structural_mismatches() {
        assert!(!CommentHandler.accepts(&ActionRecord::new(json!({"kind": "comment", "text": "x"}))));
        assert!(!CommentHandler.accepts(&ActionRecord::new(
            json!({"kind": "comment", "line": "ten", "text": "x"})
        )));
    }
}
