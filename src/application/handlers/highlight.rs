//! Highlight: select and reveal a line span.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface};
use crate::domain::types::{Action, ActionRecord};

pub struct HighlightHandler;

#[async_trait]
impl ActionHandler for HighlightHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Highlight { .. }))
    }

    async fn apply(&self, record: &ActionRecord, surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Highlight { start, end }) = record.decode() else {
            bail!("record no longer decodes as a highlight action");
        };
        surface.select_lines(start, end.unwrap_or(start)).await
    }

    fn name(&self) -> &'static str {
        "highlight"
    }
}
