//! Edit: replace a line/character range with replacement text.

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::traits::{ActionHandler, EditSurface};
use crate::domain::types::{Action, ActionRecord};

pub struct EditHandler;

#[async_trait]
impl ActionHandler for EditHandler {
    fn accepts(&self, record: &ActionRecord) -> bool {
        matches!(record.decode(), Some(Action::Edit { .. }))
    }

    async fn apply(&self, record: &ActionRecord, surface: &mut dyn EditSurface) -> Result<()> {
        let Some(Action::Edit { range, text }) = record.decode() else {
            bail!("record no longer decodes as an edit action");
        };
        surface.replace_range(&range, &text).await
    }

    fn name(&self) -> &'static str {
        "edit"
    }
}
